//! Integration tests for document rendering.

use chrono::{NaiveDate, Utc};
use pkspec_core::{EditOrigin, WizardStore};
use pkspec_model::{
    CompositionField, CompositionPatch, ExpiryBasis, LabelFormatType, LoadingMethodField,
    MarkingConcern, PackagingMaterial, PackagingMaterialType, PackagingSpecification,
    ProductCategory,
};
use pkspec_report::{
    RenderOptions, ReportFormat, build_document, render_html, render_report, render_text,
    write_report,
};

fn options() -> RenderOptions {
    RenderOptions::new(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
}

fn sample_specification() -> PackagingSpecification {
    let mut store = WizardStore::new();
    store.set_product_categories(vec![ProductCategory::Basic]);
    store.add_packaging_material(PackagingMaterial::new(PackagingMaterialType::InnerBox));
    store.add_packaging_material(PackagingMaterial::new(PackagingMaterialType::ZipperBag));
    store.advance_from_type_selection().unwrap();

    let component = store.marking_forms()[0].id.clone();
    store
        .toggle_marking_concern(&component, MarkingConcern::ManagementNumber, true)
        .unwrap();
    store
        .toggle_marking_concern(&component, MarkingConcern::ExpiryDate, true)
        .unwrap();
    let basis = CompositionPatch::new()
        .with(CompositionField::ExpiryBasis(Some(ExpiryBasis::Packaging)))
        .with(CompositionField::ExpiryMonths(Some(36)));
    store
        .update_marking_composition(&component, &basis, EditOrigin::Human)
        .unwrap();

    let inner_box = store.label_forms()[0].id.clone();
    store
        .select_label_format(&inner_box, Some(LabelFormatType::Wms))
        .unwrap();

    store.set_packaging_method_description("1. 인박스 10개 입수\n2. 테이핑");
    store.add_packaging_method_image("data:image/png;base64,iVBORw0KGgo=");
    store.update_loading_method(LoadingMethodField::BoxesPerLayer(10));
    store.update_loading_method(LoadingMethodField::LayerCount(5));
    store.update_loading_method(LoadingMethodField::MaxHeight(1500.0));
    store.full_data(Utc::now())
}

#[test]
fn text_document_lists_all_sections() {
    let text = render_text(&build_document(&sample_specification(), &options()));
    insta::assert_snapshot!(text, @r"
신제품 포장사양서
작성일: 2026. 10. 17.

1. 유형 정보
  제품 구성: 단품
  제품 유형: 기초
  포장재: 인박스, 지퍼백

2. 포장방법 / 순서
  1. 인박스 10개 입수
  2. 테이핑
  포장방법 이미지: 1장

3. 착인 정보
  1. 구성품 (구성품)
    착인 방법: 코딩
    착인 위치: 하면
    사용기한 기준: 포장일기준
    사용기한 개월수: 36개월
    착인 양식:
      ABC
      YYYYMMDD까지
  2. 단상자 (단상자)
    착인 방법: 코딩
    착인 위치: 하면
    사용기한 기준: 포장일기준
    사용기한 개월수: 36개월
    착인 양식:
      ABC
      YYYYMMDD까지

4. 포장재 라벨 정보
  1. 인박스
    라벨 양식: WMS라벨
    부착 위치: 단측면
    부착 수량: 1장
    박스 테이핑: 일자테이핑
  2. 지퍼백
    라벨 양식: 미선택
    부착 위치: 단측면
    부착 수량: 1장
  팔레트 라벨
    라벨 양식: 미선택
    부착 위치: 단측면
    부착 수량: 1장

5. 적재방법
  팔레트 종류: KPP팔레트
  1단 박스수: 10개
  단수: 5단
  최대높이 (팔레트 포함): 1500mm
  총 박스수: 50개 / 팔레트

6. 기타 요청사항
  (입력 없음)
");
}

#[test]
fn html_document_embeds_images_when_enabled() {
    let specification = sample_specification();

    let html = render_html(&build_document(&specification, &options())).unwrap();
    assert!(html.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(html.contains("<h1>신제품 포장사양서</h1>"));
    assert!(html.contains("<h2>3. 착인 정보</h2>"));
    assert!(html.contains("<th>총 박스수</th>"));
    assert!(html.contains("src=\"data:image/png;base64,iVBORw0KGgo=\""));
    assert!(html.contains("alt=\"포장방법 이미지 1\""));

    let without = render_html(&build_document(&specification, &options().without_images()))
        .unwrap();
    assert!(!without.contains("<img"));
    assert!(without.contains("포장방법 이미지: 1장"));
}

#[test]
fn html_escapes_free_text() {
    let mut specification = sample_specification();
    specification.additional_request.description = "<b>취급주의</b> & 직사광선 금지".to_string();
    let html = render_report(&specification, &options(), ReportFormat::Html).unwrap();
    assert!(html.contains("&lt;b&gt;취급주의&lt;/b&gt; &amp; 직사광선 금지"));
}

#[test]
fn custom_title_and_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("report.txt");
    let options = options().with_title("포장사양서 (초안)");

    write_report(&path, &sample_specification(), &options, ReportFormat::Text).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("포장사양서 (초안)\n작성일: 2026. 10. 17.\n"));
}
