/// A listing request template: filter, sort and field-selection parameters
/// shared by every page, plus the page size. The page number is filled in
/// per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    page_size: u32,
    params: Vec<(String, String)>,
}

impl ListingQuery {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            params: Vec::new(),
        }
    }

    /// Append a parameter. Repeated keys are kept, in order, since the
    /// listing API reads `selectFields=a&selectFields=b` as a list.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Append the same key once per value.
    pub fn params<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for value in values {
            self.params.push((key.to_string(), value.into()));
        }
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Full parameter list for `page`, paging parameters first.
    pub fn for_page(&self, page: u32) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.params.len() + 2);
        params.push(("limit".to_string(), self.page_size.to_string()));
        params.push(("page".to_string(), page.to_string()));
        params.extend(self.params.iter().cloned());
        params
    }
}
