use cinedex_model::MovieSummary;

/// Observable state of a list session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<MovieSummary>),
    Failed(String),
}

impl ListState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading)
    }

    pub fn items(&self) -> Option<&[MovieSummary]> {
        match self {
            ListState::Loaded(items) => Some(items),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ListState::Failed(message) => Some(message),
            _ => None,
        }
    }
}
