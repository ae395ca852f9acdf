/// Tabs of the result page, selected with `?tab=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultTab {
    #[default]
    Summary,
    Risks,
    Terms,
}

impl ResultTab {
    pub fn from_query(tab: Option<&str>) -> Self {
        match tab {
            Some("risks") => ResultTab::Risks,
            Some("terms") => ResultTab::Terms,
            _ => ResultTab::Summary,
        }
    }

    pub fn is_summary(&self) -> bool {
        *self == ResultTab::Summary
    }

    pub fn is_risks(&self) -> bool {
        *self == ResultTab::Risks
    }

    pub fn is_terms(&self) -> bool {
        *self == ResultTab::Terms
    }

    /// Button styling for the tab named `name`.
    pub fn class_for(&self, name: &str) -> &'static str {
        if Self::from_query(Some(name)) == *self {
            "tab tab-active"
        } else {
            "tab"
        }
    }
}
