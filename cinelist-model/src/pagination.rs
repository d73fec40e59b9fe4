/// Pagination summary for a search result.
///
/// A result with no matching records carries the all-zero value, and zero
/// fields are left off the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageMetadata {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "is_zero"))]
    pub current_page: i64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "is_zero"))]
    pub page_size: i64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "is_zero"))]
    pub first_page: i64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "is_zero"))]
    pub last_page: i64,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "is_zero"))]
    pub total_records: i64,
}

#[cfg(feature = "serde")]
fn is_zero(value: &i64) -> bool {
    *value == 0
}

impl PageMetadata {
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records <= 0 || page_size <= 0 {
            return Self::default();
        }

        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: (total_records + page_size - 1) / page_size,
            total_records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_records_yield_empty_metadata() {
        assert_eq!(PageMetadata::calculate(0, 3, 20), PageMetadata::default());
        assert!(PageMetadata::calculate(0, 1, 1).is_empty());
    }

    #[test]
    fn last_page_rounds_up() {
        let meta = PageMetadata::calculate(51, 2, 20);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.page_size, 20);
        assert_eq!(meta.first_page, 1);
        assert_eq!(meta.last_page, 3);
        assert_eq!(meta.total_records, 51);

        assert_eq!(PageMetadata::calculate(40, 1, 20).last_page, 2);
        assert_eq!(PageMetadata::calculate(1, 1, 100).last_page, 1);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn zero_fields_are_omitted() {
        let empty = serde_json::to_string(&PageMetadata::default()).unwrap();
        assert_eq!(empty, "{}");

        let value =
            serde_json::to_value(PageMetadata::calculate(5, 1, 2)).unwrap();
        assert_eq!(value["current_page"], 1);
        assert_eq!(value["last_page"], 3);
        assert_eq!(value["total_records"], 5);
    }
}
