use epi_core::{
    evaluate, CalculatorConfig, HistoryError, HistoryStore, MetricError, MetricRequest,
    MetricResult, ResultLog,
};

/// One user's calculator session: its own history plus, when persistence is
/// enabled, the file that history is loaded from and saved to.
#[derive(Debug)]
pub struct Session {
    history: ResultLog,
    store: Option<HistoryStore>,
}

impl Session {
    /// In-memory session with no backing file.
    pub fn ephemeral(config: &CalculatorConfig) -> Self {
        Self {
            history: ResultLog::with_timestamp_format(config.timestamp_format.clone()),
            store: None,
        }
    }

    /// Session seeded from the configured history file when persistence is on.
    pub fn open(config: &CalculatorConfig) -> Result<Self, HistoryError> {
        let mut session = Self::ephemeral(config);
        if config.persist_history {
            let store = HistoryStore::new(&config.history_path);
            store.load_into(&mut session.history)?;
            session.store = Some(store);
        }
        Ok(session)
    }

    /// Persisted history for read-only display. Empty when persistence is
    /// disabled or the file does not exist yet.
    pub fn saved_history(config: &CalculatorConfig) -> Result<ResultLog, HistoryError> {
        let mut history = ResultLog::with_timestamp_format(config.timestamp_format.clone());
        if !config.persist_history {
            log::debug!("History persistence disabled; not reading {:?}", config.history_path);
            return Ok(history);
        }

        let store = HistoryStore::new(&config.history_path);
        if !store.exists() {
            return Ok(history);
        }
        store.load_into(&mut history)?;
        Ok(history)
    }

    /// Evaluate `request`; successful results are appended to the history.
    pub fn calculate(&mut self, request: &MetricRequest) -> Result<MetricResult, MetricError> {
        let result = evaluate(request)?;
        self.history.record(&result);
        Ok(result)
    }

    pub fn history(&self) -> &ResultLog {
        &self.history
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Write the history to its file. No-op for in-memory sessions.
    pub fn save(&self) -> Result<(), HistoryError> {
        match &self.store {
            Some(store) => store.save(&self.history),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> CalculatorConfig {
        CalculatorConfig {
            history_path: dir.path().join("epi_history.txt"),
            ..Default::default()
        }
    }

    #[test]
    fn test_failed_calculation_is_not_logged() {
        let mut session = Session::ephemeral(&CalculatorConfig::default());
        let err = session
            .calculate(&MetricRequest::CaseFatalityRate {
                deaths: 3.0,
                cases: 0.0,
            })
            .unwrap_err();

        assert_eq!(err.to_string(), "Cases must be greater than zero.");
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_sessions_do_not_share_history() {
        let config = CalculatorConfig::default();
        let mut first = Session::ephemeral(&config);
        let second = Session::ephemeral(&config);

        first
            .calculate(&MetricRequest::Prevalence {
                existing_cases: 20.0,
                population: 200.0,
            })
            .unwrap();

        assert_eq!(first.history().len(), 1);
        assert!(second.history().is_empty());
    }

    #[test]
    fn test_history_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        let mut session = Session::open(&config).unwrap();
        assert!(session.is_persistent());
        session
            .calculate(&MetricRequest::AttackRate {
                cases: 25.0,
                population: 200.0,
            })
            .unwrap();
        session.save().unwrap();

        let reopened = Session::open(&config).unwrap();
        let lines: Vec<String> = reopened
            .history()
            .entries()
            .iter()
            .map(|e| e.display_line())
            .collect();
        assert_eq!(lines, vec!["Attack Rate (%): 12.50"]);
    }

    #[test]
    fn test_saved_history_respects_persistence_flag() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(&config.history_path, "CFR (%): 5.00\n").unwrap();

        let saved = Session::saved_history(&config).unwrap();
        assert_eq!(saved.entries()[0].display_line(), "CFR (%): 5.00");

        let disabled = CalculatorConfig {
            persist_history: false,
            ..config_in(&dir)
        };
        assert!(Session::saved_history(&disabled).unwrap().is_empty());
    }

    #[test]
    fn test_saved_history_without_file() {
        let dir = TempDir::new().unwrap();
        assert!(Session::saved_history(&config_in(&dir)).unwrap().is_empty());
    }

    #[test]
    fn test_persistence_disabled() {
        let dir = TempDir::new().unwrap();
        let config = CalculatorConfig {
            persist_history: false,
            ..config_in(&dir)
        };

        let mut session = Session::open(&config).unwrap();
        session
            .calculate(&MetricRequest::DoublingTime { growth_rate: 0.2 })
            .unwrap();
        session.save().unwrap();

        assert!(!session.is_persistent());
        assert!(!config.history_path.exists());
    }
}
