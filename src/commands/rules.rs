//! Rules command - list the rules active under the current configuration

use nblint::config::Settings;
use nblint::lint;
use nblint::output::{OutputMode, RuleInfo, RulesReport};

use super::EXIT_CLEAN;

/// List every enabled rule
pub fn rules(settings: &Settings, mode: OutputMode) -> anyhow::Result<i32> {
    let registry = lint::load(settings)?;

    let report = RulesReport {
        rules: registry
            .iter()
            .map(|definition| RuleInfo {
                slug: definition.slug.clone(),
                level: definition.level().to_string(),
                description: definition.description.clone(),
                recommendation: definition.recommendation.clone(),
            })
            .collect(),
    };

    report.render(mode);
    Ok(EXIT_CLEAN)
}
