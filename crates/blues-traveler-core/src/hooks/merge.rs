//! Deep merge of hooks configuration documents.
//!
//! Conflict rules, applied with `override_config` winning:
//! - groups and events present on one side only are copied;
//! - `parallel` is OR-combined;
//! - jobs are matched by name: a named override job replaces the base job of
//!   the same name at the base job's position, a new name is appended, and an
//!   anonymous job is always appended.
//!
//! Inputs are borrowed and never mutated; the result is a fresh value.

use super::types::{CustomHooksConfig, EventConfig, HookGroup, HookJob};

/// Merge two hooks configurations, `override_config` taking precedence.
pub fn merge_hooks_config(
    base: &CustomHooksConfig,
    override_config: &CustomHooksConfig,
) -> CustomHooksConfig {
    let mut merged = base.clone();

    for (group_name, override_group) in override_config {
        let group = match merged.get(group_name) {
            Some(base_group) => merge_groups(base_group, override_group),
            None => override_group.clone(),
        };
        merged.insert(group_name.clone(), group);
    }

    merged
}

/// Fold a sequence of configurations, later entries overriding earlier ones.
pub fn merge_all<'a, I>(configs: I) -> CustomHooksConfig
where
    I: IntoIterator<Item = &'a CustomHooksConfig>,
{
    configs
        .into_iter()
        .fold(CustomHooksConfig::new(), |acc, next| {
            merge_hooks_config(&acc, next)
        })
}

fn merge_groups(base: &HookGroup, override_group: &HookGroup) -> HookGroup {
    let mut merged = base.clone();

    for (event_name, override_event) in override_group {
        let event = match (merged.get(event_name), override_event) {
            (Some(Some(base_event)), Some(override_event)) => {
                Some(merge_events(base_event, override_event))
            }
            // A null override body never erases a defined base event.
            (Some(Some(base_event)), None) => Some(base_event.clone()),
            (_, other) => other.clone(),
        };
        merged.insert(event_name.clone(), event);
    }

    merged
}

fn merge_events(base: &EventConfig, override_event: &EventConfig) -> EventConfig {
    EventConfig {
        parallel: base.parallel || override_event.parallel,
        jobs: merge_jobs(&base.jobs, &override_event.jobs),
    }
}

fn merge_jobs(base: &[HookJob], override_jobs: &[HookJob]) -> Vec<HookJob> {
    let mut merged = base.to_vec();

    for job in override_jobs {
        if job.is_anonymous() {
            merged.push(job.clone());
            continue;
        }

        match merged
            .iter_mut()
            .find(|existing| !existing.is_anonymous() && existing.name == job.name)
        {
            Some(existing) => *existing = job.clone(),
            None => merged.push(job.clone()),
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(parallel: bool, jobs: Vec<HookJob>) -> Option<EventConfig> {
        Some(EventConfig { parallel, jobs })
    }

    fn config(group: &str, event_name: &str, body: Option<EventConfig>) -> CustomHooksConfig {
        let mut hook_group = HookGroup::new();
        hook_group.insert(event_name.to_string(), body);
        let mut cfg = CustomHooksConfig::new();
        cfg.insert(group.to_string(), hook_group);
        cfg
    }

    fn jobs_of<'a>(cfg: &'a CustomHooksConfig, group: &str, event_name: &str) -> &'a [HookJob] {
        &cfg[group][event_name].as_ref().unwrap().jobs
    }

    #[test]
    fn test_disjoint_groups_are_copied() {
        let base = config("python", "PostToolUse", event(false, vec![HookJob::new("ruff", "ruff")]));
        let over = config("go", "PostToolUse", event(false, vec![HookJob::new("vet", "go vet")]));

        let merged = merge_hooks_config(&base, &over);
        assert_eq!(merged.len(), 2);
        assert_eq!(jobs_of(&merged, "python", "PostToolUse")[0].run, "ruff");
        assert_eq!(jobs_of(&merged, "go", "PostToolUse")[0].run, "go vet");
    }

    #[test]
    fn test_disjoint_events_are_copied() {
        let base = config("python", "PreToolUse", event(false, vec![HookJob::new("a", "a")]));
        let over = config("python", "Stop", event(false, vec![HookJob::new("b", "b")]));

        let merged = merge_hooks_config(&base, &over);
        assert_eq!(merged["python"].len(), 2);
    }

    #[test]
    fn test_named_override_replaces_in_place() {
        let base = config(
            "python",
            "PostToolUse",
            event(
                false,
                vec![
                    HookJob::new("ruff", "ruff check"),
                    HookJob::new("mypy", "mypy ."),
                ],
            ),
        );
        let mut replacement = HookJob::new("ruff", "ruff check --fix");
        replacement.timeout = Some(10);
        let over = config("python", "PostToolUse", event(false, vec![replacement.clone()]));

        let merged = merge_hooks_config(&base, &over);
        let jobs = jobs_of(&merged, "python", "PostToolUse");

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0], replacement);
        assert_eq!(jobs[1].name, "mypy");
        assert_eq!(jobs.iter().filter(|j| j.name == "ruff").count(), 1);
    }

    #[test]
    fn test_new_and_anonymous_jobs_are_appended() {
        let base = config(
            "python",
            "PostToolUse",
            event(false, vec![HookJob::new("", "echo base"), HookJob::new("a", "a")]),
        );
        let over = config(
            "python",
            "PostToolUse",
            event(false, vec![HookJob::new("", "echo over"), HookJob::new("b", "b")]),
        );

        let merged = merge_hooks_config(&base, &over);
        let runs: Vec<&str> = jobs_of(&merged, "python", "PostToolUse")
            .iter()
            .map(|j| j.run.as_str())
            .collect();

        assert_eq!(runs, vec!["echo base", "a", "echo over", "b"]);
    }

    #[test]
    fn test_parallel_is_or_combined() {
        for (base_parallel, over_parallel) in
            [(false, false), (false, true), (true, false), (true, true)]
        {
            let base = config("g", "Stop", event(base_parallel, vec![]));
            let over = config("g", "Stop", event(over_parallel, vec![]));
            let merged = merge_hooks_config(&base, &over);
            assert_eq!(
                merged["g"]["Stop"].as_ref().unwrap().parallel,
                base_parallel || over_parallel
            );
        }
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let base = config("g", "Stop", event(false, vec![HookJob::new("a", "a")]));
        let over = config(
            "g",
            "Stop",
            event(true, vec![HookJob::new("a", "a2"), HookJob::new("b", "b")]),
        );
        let base_before = base.clone();
        let over_before = over.clone();

        let _ = merge_hooks_config(&base, &over);

        assert_eq!(base, base_before);
        assert_eq!(over, over_before);
    }

    #[test]
    fn test_self_merge_is_idempotent() {
        let cfg = config(
            "g",
            "Stop",
            event(true, vec![HookJob::new("a", "a"), HookJob::new("b", "b")]),
        );

        let merged = merge_hooks_config(&cfg, &cfg);
        assert_eq!(merged, cfg);
    }

    #[test]
    fn test_null_override_event_keeps_base() {
        let base = config("g", "Stop", event(false, vec![HookJob::new("a", "a")]));
        let over = config("g", "Stop", None);

        let merged = merge_hooks_config(&base, &over);
        assert_eq!(jobs_of(&merged, "g", "Stop").len(), 1);
    }

    #[test]
    fn test_merge_all_later_wins() {
        let low = config("g", "Stop", event(false, vec![HookJob::new("a", "low")]));
        let high = config("g", "Stop", event(false, vec![HookJob::new("a", "high")]));

        let merged = merge_all([&low, &high]);
        assert_eq!(jobs_of(&merged, "g", "Stop")[0].run, "high");
    }
}
