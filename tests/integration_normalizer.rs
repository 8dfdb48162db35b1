use reqsift::models::{ItemRequirement, UNDETERMINED_PAGE};
use reqsift::services::normalizer;

#[test]
fn test_reference_markdown_to_items() {
    let markdown = "\
## Yêu cầu kỹ thuật
1. Máy chủ (Trang 2)
- CPU 8 lõi (Trang 2)
- RAM 32GB (Trang 3)
2. Phần mềm
+ Hỗ trợ tiếng Việt (Trang 4)
";

    let items = normalizer::normalize(markdown);

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].item_title, "Máy chủ");
    assert_eq!(
        items[0].item_requirements,
        vec![
            ItemRequirement::new("2", "CPU 8 lõi"),
            ItemRequirement::new("3", "RAM 32GB"),
        ]
    );
    assert_eq!(items[1].item_title, "Phần mềm");
    assert_eq!(
        items[1].item_requirements,
        vec![ItemRequirement::new("4", "Hỗ trợ tiếng Việt")]
    );
}

#[test]
fn test_noisy_markdown_is_tolerated() {
    let markdown = "\
Lỗi không đọc được một phần văn bản.
## Yêu cầu kỹ thuật
- mồ côi trước mục đầu tiên
1. Thiết bị mạng
- Switch 24 cổng (trang 5)
ghi chú tự do không thuộc ngữ pháp
- Không rõ nguồn trang
";

    let items = normalizer::normalize(markdown);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_title, "Thiết bị mạng");
    assert_eq!(items[0].item_requirements.len(), 2);
    assert_eq!(items[0].item_requirements[0].page, "5");
    assert_eq!(items[0].item_requirements[1].page, UNDETERMINED_PAGE);
}

#[test]
fn test_json_output_contract() {
    let items = normalizer::normalize("1. Máy chủ (Trang 2)\n- CPU 8 lõi (Trang 2)\n");
    let json = normalizer::to_json(&items).unwrap();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value[0]["item_title"], "Máy chủ");
    assert_eq!(value[0]["item_requirements"][0]["page"], "2");
    assert_eq!(value[0]["item_requirements"][0]["content"], "CPU 8 lõi");
}

#[test]
fn test_render_normalize_roundtrip() {
    let items = normalizer::normalize(
        "1. Máy chủ (Trang 2)\n- CPU 8 lõi (Trang 2)\n2. Phần mềm\n- Hỗ trợ tiếng Việt\n",
    );

    let rerendered = normalizer::render_markdown(&items);
    assert_eq!(normalizer::normalize(&rerendered), items);
}
