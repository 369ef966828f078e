use crate::constants::REQUEST_ADD_PATH;
use crate::errors::AppResult;
use crate::models::TldOption;
use crate::reporter::{element_text, Session};
use scraper::{Html, Selector};
use std::collections::BTreeMap;
use std::sync::OnceLock;

// One div per TLD checkbox on the "add request" form
const TLD_ITEM_SELECTOR: &str = r#"div[class*="form-item-tlds-fieldset-tld-"]"#;
const INPUT_SELECTOR: &str = "input";
const LABEL_SELECTOR: &str = "label";

// Catch-all option on the form, never a real zone
const ALL_TLDS_LABEL: &str = "All TLDs";

static TLD_ITEM_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static INPUT_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();
static LABEL_SELECTOR_CACHED: OnceLock<Selector> = OnceLock::new();

/// Fetches the "add request" form page and buckets every requestable TLD by
/// availability category.
pub async fn check_open_requests(
    session: &Session,
    ignore_tlds: &[String],
) -> AppResult<BTreeMap<String, Vec<TldOption>>> {
    let body = session.get_html(REQUEST_ADD_PATH).await?;
    parse_open_requests(&body, ignore_tlds)
}

/// Scans the per-TLD checkbox items of the add-request form.
///
/// Each item yields the input's form field name and the label text (the TLD).
/// The bucket key is the input's class attribute with `form-checkbox` removed
/// and trimmed; an empty remainder means the zone is requestable and buckets
/// as `"open"`. Ignore-listed labels and the literal "All TLDs" option are
/// skipped.
pub fn parse_open_requests(
    html: &str,
    ignore_tlds: &[String],
) -> AppResult<BTreeMap<String, Vec<TldOption>>> {
    let document = Html::parse_document(html);

    let item_selector = TLD_ITEM_SELECTOR_CACHED.get_or_init(|| {
        Selector::parse(TLD_ITEM_SELECTOR).expect("TLD_ITEM_SELECTOR is a valid selector")
    });
    let input_selector = INPUT_SELECTOR_CACHED
        .get_or_init(|| Selector::parse(INPUT_SELECTOR).expect("INPUT_SELECTOR is a valid selector"));
    let label_selector = LABEL_SELECTOR_CACHED
        .get_or_init(|| Selector::parse(LABEL_SELECTOR).expect("LABEL_SELECTOR is a valid selector"));

    let mut data: BTreeMap<String, Vec<TldOption>> = BTreeMap::new();
    for item in document.select(item_selector) {
        let Some(input) = item.select(input_selector).next() else {
            continue;
        };
        let Some(label) = item.select(label_selector).next() else {
            continue;
        };

        let zone = element_text(&label);
        if zone == ALL_TLDS_LABEL || ignore_tlds.iter().any(|t| t == &zone) {
            continue;
        }
        let Some(name) = input.value().attr("name") else {
            continue;
        };

        let class = input.value().attr("class").unwrap_or_default();
        let category = class.replace("form-checkbox", "").trim().to_string();
        let category = if category.is_empty() {
            "open".to_string()
        } else {
            category
        };

        data.entry(category).or_default().push(TldOption {
            field_name: name.to_string(),
            zone,
        });
    }

    Ok(data)
}

/// Prints the operator-facing open/expired summary to stdout.
pub fn print_summary(data: &BTreeMap<String, Vec<TldOption>>) {
    for key in ["open", "expired"] {
        if let Some(items) = data.get(key) {
            println!("{key}:");
            for item in items {
                println!("  {}", item.zone);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::parse_open_requests;

    fn ignore() -> Vec<String> {
        vec!["TEST".to_string(), "test2".to_string()]
    }

    const ADD_REQUEST_PAGE: &str = r#"
        <html><body><form>
          <div class="form-item form-type-checkbox form-item-tlds-fieldset-tld-com">
            <input type="checkbox" name="tlds_fieldset[tld][com]" class="form-checkbox" />
            <label for="edit-tld-com">com</label>
          </div>
          <div class="form-item form-type-checkbox form-item-tlds-fieldset-tld-net">
            <input type="checkbox" name="tlds_fieldset[tld][net]" class="form-checkbox expired" />
            <label for="edit-tld-net">net</label>
          </div>
          <div class="form-item form-type-checkbox form-item-tlds-fieldset-tld-test">
            <input type="checkbox" name="tlds_fieldset[tld][test]" class="form-checkbox" />
            <label for="edit-tld-test">TEST</label>
          </div>
          <div class="form-item form-type-checkbox form-item-tlds-fieldset-tld-all">
            <input type="checkbox" name="tlds_fieldset[tld][all]" class="form-checkbox" />
            <label for="edit-tld-all">All TLDs</label>
          </div>
          <div class="form-item form-type-checkbox form-item-tlds-fieldset-tld-org">
            <input type="checkbox" name="tlds_fieldset[tld][org]" class="form-checkbox pending" />
            <label for="edit-tld-org">org</label>
          </div>
        </form></body></html>
    "#;

    #[test]
    fn test_parse_open_requests_buckets_by_category() {
        let data = parse_open_requests(ADD_REQUEST_PAGE, &ignore()).unwrap();

        let open = data.get("open").unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].zone, "com");
        assert_eq!(open[0].field_name, "tlds_fieldset[tld][com]");

        let expired = data.get("expired").unwrap();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].zone, "net");

        let pending = data.get("pending").unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].zone, "org");
    }

    #[test]
    fn test_parse_open_requests_skips_ignore_list_and_catch_all() {
        let data = parse_open_requests(ADD_REQUEST_PAGE, &ignore()).unwrap();
        for options in data.values() {
            assert!(options.iter().all(|o| o.zone != "TEST"));
            assert!(options.iter().all(|o| o.zone != "All TLDs"));
        }
    }

    #[test]
    fn test_parse_open_requests_empty_page() {
        let data = parse_open_requests("<html><body></body></html>", &ignore()).unwrap();
        assert!(data.is_empty());
    }
}
