//! Place result model shared by search, display and export.

/// One place returned by a keyword search, enriched with its postal code.
///
/// Identity is positional: results keep the order the search service
/// returned them in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Place name as shown on the map
    pub name: String,
    /// Five digit postal code, empty when the lookup failed
    pub postal_code: String,
    /// Lot-number (지번) address
    pub lot_address: String,
    /// Road-name (도로명) address, may be empty
    pub road_address: String,
}

impl SearchResult {
    /// Creates a result from its four columns.
    pub fn new(
        name: impl Into<String>,
        postal_code: impl Into<String>,
        lot_address: impl Into<String>,
        road_address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            postal_code: postal_code.into(),
            lot_address: lot_address.into(),
            road_address: road_address.into(),
        }
    }

    /// Address used for postal code lookup.
    ///
    /// Road-name addresses resolve more reliably, so they win when present.
    pub fn lookup_address<'a>(lot_address: &'a str, road_address: &'a str) -> &'a str {
        if road_address.is_empty() {
            lot_address
        } else {
            road_address
        }
    }

    /// Columns in export order: name, postal code, lot address, road address.
    pub fn to_row(&self) -> [&str; 4] {
        [
            self.name.as_str(),
            self.postal_code.as_str(),
            self.lot_address.as_str(),
            self.road_address.as_str(),
        ]
    }
}

impl std::fmt::Display for SearchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}]", self.name)?;
        writeln!(f, "지번: {}", self.lot_address)?;
        writeln!(f, "도로명: {}", self.road_address)?;
        write!(f, "우편번호: {}", self.postal_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_address_prefers_road_address() {
        assert_eq!(
            SearchResult::lookup_address("서울 중구 명동2가 1-1", "서울 중구 명동길 14"),
            "서울 중구 명동길 14"
        );
        assert_eq!(
            SearchResult::lookup_address("서울 중구 명동2가 1-1", ""),
            "서울 중구 명동2가 1-1"
        );
    }

    #[test]
    fn test_row_column_order() {
        let result = SearchResult::new("스타벅스 명동점", "04536", "명동2가 1-1", "명동길 14");

        assert_eq!(
            result.to_row(),
            ["스타벅스 명동점", "04536", "명동2가 1-1", "명동길 14"]
        );
    }

    #[test]
    fn test_display_format() {
        let result = SearchResult::new("카페", "", "지번", "");
        let rendered = result.to_string();

        assert!(rendered.starts_with("[카페]\n"));
        assert!(rendered.ends_with("우편번호: "));
    }
}
