//! Assembly of the printable document from a specification snapshot.

use chrono::NaiveDate;
use pkspec_core::render_form;
use pkspec_model::{
    LabelFormatType, LabelTarget, MarkingFormData, MarkingMethod, MarkingPosition,
    PackagingMaterial, PackagingMaterialType, PackagingSpecification, ProductConfig,
    TubeCuttingLength, TubeCuttingShape, TypeSelectionData, label_or_other,
};

pub const DEFAULT_TITLE: &str = "신제품 포장사양서";
const NO_INPUT: &str = "(입력 없음)";
const NOT_SET: &str = "미설정";
const NOT_SELECTED: &str = "미선택";

/// Options for document rendering.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub title: String,
    /// Date printed as the authoring date.
    pub date: NaiveDate,
    /// Embed uploaded images; text output only counts them.
    pub include_images: bool,
}

impl RenderOptions {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            date,
            include_images: true,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn without_images(mut self) -> Self {
        self.include_images = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub value: String,
}

impl Row {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Table(Vec<Row>),
    /// Free text; may span several lines.
    Text(String),
    /// Marking layout lines under a caption.
    Lines { caption: String, lines: Vec<String> },
    /// Uploaded images (data URLs).
    Images { caption: String, sources: Vec<String> },
    /// Titled sub-block, one per form.
    Group { heading: String, blocks: Vec<Block> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub date_line: String,
    /// Whether image blocks embed their sources or are only counted.
    pub include_images: bool,
    pub sections: Vec<Section>,
}

/// Build the six-section document for `specification`.
pub fn build_document(
    specification: &PackagingSpecification,
    options: &RenderOptions,
) -> Document {
    let selection = &specification.type_selection;
    let sections = vec![
        Section {
            heading: "1. 유형 정보".to_string(),
            blocks: vec![Block::Table(type_rows(selection))],
        },
        Section {
            heading: "2. 포장방법 / 순서".to_string(),
            blocks: described(
                &specification.packaging_method.description,
                &specification.packaging_method.images,
                "포장방법 이미지",
            ),
        },
        Section {
            heading: "3. 착인 정보".to_string(),
            blocks: specification
                .marking_forms
                .iter()
                .enumerate()
                .map(|(index, form)| marking_group(index, form, selection.product_config))
                .collect(),
        },
        Section {
            heading: "4. 포장재 라벨 정보".to_string(),
            blocks: label_blocks(specification),
        },
        Section {
            heading: "5. 적재방법".to_string(),
            blocks: vec![Block::Table(loading_rows(specification))],
        },
        Section {
            heading: "6. 기타 요청사항".to_string(),
            blocks: described(
                &specification.additional_request.description,
                &specification.additional_request.images,
                "기타 요청사항 이미지",
            ),
        },
    ];
    Document {
        title: options.title.clone(),
        date_line: format!("작성일: {}", options.date.format("%Y. %-m. %-d.")),
        include_images: options.include_images,
        sections,
    }
}

fn material_text(material: &PackagingMaterial) -> String {
    if material.material_type == PackagingMaterialType::Other {
        material.custom_name.clone().unwrap_or_default()
    } else {
        material.material_type.label().to_string()
    }
}

fn type_rows(selection: &TypeSelectionData) -> Vec<Row> {
    let mut rows = vec![
        Row::new("제품 구성", selection.product_config.label()),
        Row::new("제품 유형", selection.category_labels().join(", ")),
        Row::new(
            "포장재",
            selection
                .packaging_materials
                .iter()
                .map(material_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
    ];
    if selection.product_config == ProductConfig::Set
        && let Some(components) = &selection.set_components
    {
        let described: Vec<String> = components
            .iter()
            .enumerate()
            .map(|(index, component)| {
                let mut text = format!("{}. {}", index + 1, component.name);
                if component.has_individual_pouch {
                    text.push_str(" (파우치 O)");
                }
                text.push_str(if component.has_individual_box {
                    " (단상자 O)"
                } else {
                    " (단상자 X)"
                });
                text
            })
            .collect();
        rows.push(Row::new("세트 구성품", described.join(", ")));
    }
    rows
}

fn described(description: &str, images: &[String], caption: &str) -> Vec<Block> {
    let text = if description.is_empty() {
        NO_INPUT
    } else {
        description
    };
    let mut blocks = vec![Block::Text(text.to_string())];
    if !images.is_empty() {
        blocks.push(Block::Images {
            caption: caption.to_string(),
            sources: images.to_vec(),
        });
    }
    blocks
}

fn cutting_length_text(form: &MarkingFormData, config: ProductConfig) -> Option<String> {
    let length = form.tube_cutting_length?;
    if length == TubeCuttingLength::Custom {
        return Some(form.tube_cutting_length_custom.clone().unwrap_or_default());
    }
    let label = TubeCuttingLength::options_for(config)
        .into_iter()
        .find(|(option, _)| *option == length)
        .map_or(length.label(), |(_, label)| label);
    Some(label.to_string())
}

fn marking_group(
    index: usize,
    form: &MarkingFormData,
    config: ProductConfig,
) -> Block {
    let composition = &form.composition;
    let mut rows = vec![
        Row::new(
            "착인 방법",
            label_or_other(form.method, MarkingMethod::Other, form.method_other.as_deref()),
        ),
        Row::new(
            "착인 위치",
            label_or_other(
                form.position,
                MarkingPosition::Other,
                form.position_other.as_deref(),
            ),
        ),
    ];
    if form.is_tube() {
        if let Some(shape) = form.tube_cutting_shape {
            rows.push(Row::new(
                "튜브 커팅 모양",
                label_or_other(
                    shape,
                    TubeCuttingShape::Other,
                    form.tube_cutting_shape_other.as_deref(),
                ),
            ));
        }
        if let Some(length) = cutting_length_text(form, config) {
            rows.push(Row::new("튜브 커팅 길이", length));
        }
    }
    if composition.uses_dates() {
        rows.push(Row::new(
            "사용기한 기준",
            composition
                .expiry_basis
                .map_or(NOT_SET, |basis| basis.label()),
        ));
        rows.push(Row::new(
            "사용기한 개월수",
            composition
                .expiry_months
                .filter(|months| *months > 0)
                .map_or_else(|| NOT_SET.to_string(), |months| format!("{months}개월")),
        ));
    }

    let mut blocks = vec![Block::Table(rows)];
    let lines = render_form(form);
    if !lines.is_empty() {
        blocks.push(Block::Lines {
            caption: "착인 양식".to_string(),
            lines,
        });
    }
    if let Some(image) = &form.position_image {
        blocks.push(Block::Images {
            caption: "착인 위치 이미지".to_string(),
            sources: vec![image.clone()],
        });
    }
    Block::Group {
        heading: format!(
            "{}. {} ({})",
            index + 1,
            form.target_name,
            form.target_type.label()
        ),
        blocks,
    }
}

fn label_rows<L: LabelTarget>(label: &L) -> Vec<Row> {
    let mut rows = vec![
        Row::new(
            "라벨 양식",
            label.format_type().map_or(NOT_SELECTED, LabelFormatType::label),
        ),
        Row::new("부착 위치", label.attach_position_text()),
        Row::new("부착 수량", label.attach_count_text()),
    ];
    let items = label.custom_display_items();
    if !items.is_empty() {
        rows.push(Row::new("라벨 항목", items.join(", ")));
    }
    rows
}

fn label_blocks(specification: &PackagingSpecification) -> Vec<Block> {
    let mut blocks: Vec<Block> = specification
        .label_forms
        .iter()
        .enumerate()
        .map(|(index, form)| {
            let mut rows = label_rows(form);
            if let Some(taping) = form.taping_text() {
                rows.push(Row::new("박스 테이핑", taping));
            }
            let mut inner = vec![Block::Table(rows)];
            if form.format_type == Some(LabelFormatType::Separate)
                && let Some(image) = &form.separate_format_image
            {
                inner.push(Block::Images {
                    caption: "별도 양식 이미지".to_string(),
                    sources: vec![image.clone()],
                });
            }
            Block::Group {
                heading: format!("{}. {}", index + 1, form.display_name()),
                blocks: inner,
            }
        })
        .collect();
    let palette = &specification.palette_label;
    blocks.push(Block::Group {
        heading: palette.display_name(),
        blocks: vec![Block::Table(label_rows(palette))],
    });
    blocks
}

fn loading_rows(specification: &PackagingSpecification) -> Vec<Row> {
    let loading = &specification.loading_method;
    vec![
        Row::new("팔레트 종류", loading.palette_text()),
        Row::new("1단 박스수", format!("{}개", loading.boxes_per_layer)),
        Row::new("단수", format!("{}단", loading.layer_count)),
        Row::new("최대높이 (팔레트 포함)", format!("{}mm", loading.max_height)),
        Row::new("총 박스수", format!("{}개 / 팔레트", loading.total_boxes())),
    ]
}
