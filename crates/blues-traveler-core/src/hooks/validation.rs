use super::errors::HooksConfigError;
use super::types::CustomHooksConfig;

/// Check the minimal required fields of a hooks configuration.
///
/// Fails on the first null event body, blank job name, or blank run command,
/// in group/event order. Job indexes in errors are zero-based.
pub fn validate_hooks_config(config: &CustomHooksConfig) -> Result<(), HooksConfigError> {
    for (group_name, group) in config {
        for (event_name, event) in group {
            let Some(event) = event else {
                return Err(HooksConfigError::NullEvent {
                    group: group_name.clone(),
                    event: event_name.clone(),
                });
            };

            for (index, job) in event.jobs.iter().enumerate() {
                let problem = if job.name.trim().is_empty() {
                    Some("job name is blank")
                } else if job.run.trim().is_empty() {
                    Some("run command is blank")
                } else {
                    None
                };

                if let Some(message) = problem {
                    return Err(HooksConfigError::InvalidJob {
                        group: group_name.clone(),
                        event: event_name.clone(),
                        index,
                        message: message.to_string(),
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::types::{EventConfig, HookGroup, HookJob};

    fn single(jobs: Vec<HookJob>) -> CustomHooksConfig {
        let mut group = HookGroup::new();
        group.insert(
            "PostToolUse".to_string(),
            Some(EventConfig {
                parallel: false,
                jobs,
            }),
        );
        let mut config = CustomHooksConfig::new();
        config.insert("python".to_string(), group);
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_hooks_config(&single(vec![HookJob::new("ruff", "ruff check")])).is_ok());
        assert!(validate_hooks_config(&CustomHooksConfig::new()).is_ok());
    }

    #[test]
    fn test_blank_name_reports_index() {
        let config = single(vec![
            HookJob::new("ruff", "ruff check"),
            HookJob::new("  ", "mypy ."),
        ]);

        match validate_hooks_config(&config) {
            Err(HooksConfigError::InvalidJob {
                group,
                event,
                index,
                message,
            }) => {
                assert_eq!(group, "python");
                assert_eq!(event, "PostToolUse");
                assert_eq!(index, 1);
                assert!(message.contains("name"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_blank_run_is_rejected() {
        let err = validate_hooks_config(&single(vec![HookJob::new("ruff", "")])).unwrap_err();
        assert!(err.to_string().contains("run command is blank"));
    }

    #[test]
    fn test_null_event_is_rejected() {
        let mut group = HookGroup::new();
        group.insert("Stop".to_string(), None);
        let mut config = CustomHooksConfig::new();
        config.insert("go".to_string(), group);

        assert!(matches!(
            validate_hooks_config(&config),
            Err(HooksConfigError::NullEvent { .. })
        ));
    }
}
