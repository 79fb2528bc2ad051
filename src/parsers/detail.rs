use crate::error::HarvestError;
use crate::records::{FieldValue, ProductRecord};
use scraper::{Html, Selector};

/// Title block whose nested blue span holds the model name.
const MODEL_SELECTOR: &str = "div.cont-block-title span.blue";

/// Label describing the configuration on display, e.g. `Model XZ ("Midnight Blue")`.
const CONFIGURATION_SELECTOR: &str = "span.item-conf-name";

/// Characteristic markers; each carries a `title` attribute of the form
/// `Name: value`.
const CHARACTERISTIC_SELECTOR: &str = "div.m-s-f3";

/// Parse a rendered detail page into a product record.
///
/// The record is seeded with `url`, `model` and `color`, then one field per
/// characteristic element. A missing model name or configuration label is a
/// per-page layout failure; malformed characteristic titles are skipped.
pub fn parse_detail(html: &str, absolute_url: &str) -> Result<ProductRecord, HarvestError> {
    let doc = Html::parse_document(html);

    let model_selector = Selector::parse(MODEL_SELECTOR).unwrap();
    let model = doc
        .select(&model_selector)
        .next()
        .and_then(|e| e.text().next())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| HarvestError::layout("model name", absolute_url))?;

    let configuration_selector = Selector::parse(CONFIGURATION_SELECTOR).unwrap();
    let label = doc
        .select(&configuration_selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .ok_or_else(|| HarvestError::layout("configuration label", absolute_url))?;

    let mut record = ProductRecord::new();
    record.insert("url", absolute_url);
    record.insert("model", model);
    record.insert("color", color_from_label(&label));

    let characteristic_selector = Selector::parse(CHARACTERISTIC_SELECTOR).unwrap();
    for element in doc.select(&characteristic_selector) {
        let Some(title) = element.value().attr("title") else {
            ::log::debug!("characteristic without title attribute on {}", absolute_url);
            continue;
        };
        let Some((name, data)) = title.split_once(": ") else {
            ::log::debug!("unsplittable characteristic {:?} on {}", title, absolute_url);
            continue;
        };
        record.insert(name, characteristic_value(data));
    }

    Ok(record)
}

/// The color is the first double-quoted substring of the configuration label,
/// trimmed; a label without quotes is the color itself.
fn color_from_label(label: &str) -> String {
    match label.split('"').nth(1) {
        Some(quoted) => quoted.trim().to_string(),
        None => label.to_string(),
    }
}

/// Normalize a characteristic's data: non-breaking spaces become regular
/// spaces, and comma-delimited data becomes an ordered list of trimmed values.
fn characteristic_value(data: &str) -> FieldValue {
    let data = data.replace('\u{a0}', " ");
    if data.contains(',') {
        FieldValue::Many(data.split(',').map(|part| part.trim().to_string()).collect())
    } else {
        FieldValue::Scalar(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_quoted_label() {
        assert_eq!(
            color_from_label(r#"Model XZ ("Midnight Blue")"#),
            "Midnight Blue"
        );
    }

    #[test]
    fn test_color_from_plain_label() {
        assert_eq!(color_from_label("Standard"), "Standard");
    }

    #[test]
    fn test_comma_delimited_characteristic_becomes_list() {
        assert_eq!(
            characteristic_value("128,256, 512"),
            FieldValue::Many(vec!["128".into(), "256".into(), "512".into()])
        );
    }

    #[test]
    fn test_plain_characteristic_stays_scalar() {
        assert_eq!(
            characteristic_value("4000"),
            FieldValue::Scalar("4000".into())
        );
    }

    #[test]
    fn test_non_breaking_spaces_are_normalized() {
        assert_eq!(
            characteristic_value("4000\u{a0}mAh"),
            FieldValue::Scalar("4000 mAh".into())
        );
    }
}
