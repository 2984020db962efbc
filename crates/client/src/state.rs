//! Observable state shared by every container.

/// What a screen renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

/// Coarse status derived from a [`QueryState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Loading,
    Success,
    Error,
}

impl<T> QueryState<T> {
    pub fn status(&self) -> QueryStatus {
        if self.is_loading {
            QueryStatus::Loading
        } else if self.error.is_some() {
            QueryStatus::Error
        } else if self.data.is_some() {
            QueryStatus::Success
        } else {
            QueryStatus::Idle
        }
    }

    pub(crate) fn begin(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Settle a finished request. A failure clears stale data.
    pub(crate) fn finish(&mut self, outcome: Result<T, String>) {
        self.is_loading = false;
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(error) => {
                self.data = None;
                self.error = Some(error);
            }
        }
    }

    pub(crate) fn fail(&mut self, error: impl Into<String>) {
        self.finish(Err(error.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_lifecycle() {
        let mut state = QueryState::<u32>::default();
        assert_eq!(state.status(), QueryStatus::Idle);

        state.begin();
        assert_eq!(state.status(), QueryStatus::Loading);

        state.finish(Ok(3));
        assert_eq!(state.status(), QueryStatus::Success);
        assert_eq!(state.data, Some(3));

        state.begin();
        state.fail("設備取得に失敗しました");
        assert_eq!(state.status(), QueryStatus::Error);
        assert_eq!(state.data, None);
    }

    #[test]
    fn begin_clears_previous_error() {
        let mut state = QueryState::<u32>::default();
        state.fail("boom");
        state.begin();
        assert!(state.error.is_none());
    }
}
