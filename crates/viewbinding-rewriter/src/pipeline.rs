//! Drives a whole run: modules, then files, then variants, then classes.

use std::collections::{BTreeSet, HashSet};

use regex::Regex;
use tracing::{debug, info, trace, warn};

use crate::applier;
use crate::config::Settings;
use crate::error::{RewriteError, RewriteResult};
use crate::host::Host;
use crate::matcher::{self, MatchResult};
use crate::model::{ClassDeclaration, CompilationUnit};
use crate::plan::{self, PlanContext, RenameEdit, RewritePlan};
use crate::rename;
use crate::report::{ClassRewrite, Failure, RunReport, SkippedField};
use crate::variant::VariantSpec;
use crate::vfs::FileId;
use crate::syntax::helpers::range_text;
use crate::workspace::index::{FileOccurrences, Occurrence, Qualifier};

pub struct Pipeline<'a, H: Host> {
    host: &'a H,
    settings: &'a Settings,
    variants: Vec<VariantSpec>,
}

impl<'a, H: Host> Pipeline<'a, H> {
    pub fn new(
        host: &'a H,
        settings: &'a Settings,
    ) -> RewriteResult<Self> {
        let variants = settings.enabled_variants()?;
        Ok(Self {
            host,
            settings,
            variants,
        })
    }

    pub async fn run(&self) -> RewriteResult<RunReport> {
        let mut report = RunReport::default();
        let variant_names: Vec<&str> = self.variants.iter().map(|variant| variant.name.as_str()).collect();
        info!("running variants: {}", variant_names.join(", "));

        for module in self.host.modules() {
            let Some(app_prefix) = self.settings.app_prefix(&module) else {
                warn!("skipping module {module}: no application prefix configured");
                report.skipped_modules.push(module);
                continue;
            };
            debug!("module {module} uses application prefix {app_prefix}");

            for file in self.host.enumerate_source_files(&module) {
                report.files_scanned += 1;
                let touched = self.process_file(&file, app_prefix, &mut report).await?;
                for touched_file in touched {
                    if self.host.persist(&touched_file).await? {
                        report.touched_files.insert(touched_file);
                    }
                }
            }
        }

        info!(
            "run complete: {} class(es) rewritten, {} failure(s), {} file(s) touched",
            report.classes_rewritten,
            report.failures.len(),
            report.touched_files.len()
        );
        Ok(report)
    }

    /// Rewrites every matching class of `file`; returns the files that need persisting.
    async fn process_file(
        &self,
        file: &FileId,
        app_prefix: &str,
        report: &mut RunReport,
    ) -> RewriteResult<BTreeSet<FileId>> {
        let mut touched = BTreeSet::new();
        for variant in &self.variants {
            let mut visited: HashSet<String> = HashSet::new();
            loop {
                self.host.wait_for_index_fresh().await?;
                let unit = self.host.load(file)?;
                let Some((class, matched)) = next_match(&unit, variant, &mut visited) else {
                    break;
                };
                report.classes_matched += 1;
                debug!("{} matches variant {} with binding {}", class.qualified_name, variant.name, matched.binding.name);
                let files = self.rewrite_class(file, &class, &matched, variant, app_prefix, report).await?;
                touched.extend(files);
            }
        }
        Ok(touched)
    }

    async fn rewrite_class(
        &self,
        file: &FileId,
        class: &ClassDeclaration,
        matched: &MatchResult,
        variant: &VariantSpec,
        app_prefix: &str,
        report: &mut RunReport,
    ) -> RewriteResult<BTreeSet<FileId>> {
        let placeholder_prefix = self.settings.placeholder_prefix.as_str();
        let ctx = PlanContext {
            file,
            app_prefix,
            placeholder_prefix,
        };
        let plan = plan::plan(class, matched, variant, ctx);

        for field in &matched.skipped_fields {
            warn!("{}: bindView field `{field}` has no readable id, leaving it in place", class.qualified_name);
            report.skipped_fields.push(SkippedField {
                file: file.clone(),
                class: class.qualified_name.clone(),
                field: field.clone(),
            });
        }

        let mut touched = BTreeSet::new();
        let mut renamed: Vec<&RenameEdit> = Vec::new();
        for rename_edit in plan.renames() {
            match rename::rename_all_uses(self.host, rename_edit).await {
                Ok(files) => {
                    touched.extend(files);
                    renamed.push(rename_edit);
                },
                Err(error) => {
                    rename::revert(self.host, renamed.iter().copied(), &touched).await?;
                    self.record_failure(file, &plan, error.to_string(), report);
                    return Ok(touched);
                },
            }
        }

        self.host.wait_for_index_fresh().await?;
        let label = format!("apply view binding to {}", class.qualified_name);
        let mut changed = false;
        let applied = self
            .host
            .run_atomic(file, &label, |unit| {
                let rewritten = applier::apply(unit, &plan)?;
                ensure_no_leftover_uses(&rewritten, &plan.class, &renamed)?;
                changed = rewritten.text() != unit.text();
                Ok(rewritten.text().to_string())
            })
            .await;

        if let Err(error) = applied {
            rename::revert(self.host, renamed.iter().copied(), &touched).await?;
            self.record_failure(file, &plan, error.to_string(), report);
            return Ok(touched);
        }

        for other in touched.iter().filter(|other| *other != file) {
            self.host
                .run_atomic(other, "resolve binding placeholders", |unit| {
                    Ok(applier::resolve_placeholders(unit.text(), placeholder_prefix))
                })
                .await?;
        }
        touched.insert(file.clone());

        if changed || !renamed.is_empty() {
            info!("rewrote {} ({}) with {}", class.qualified_name, variant.name, plan.binding_name);
            report.classes_rewritten += 1;
            report.fields_renamed += renamed.len();
            report.rewrites.push(ClassRewrite {
                file: file.clone(),
                class: class.qualified_name.clone(),
                variant: variant.name.clone(),
                binding: matched.binding.clone(),
                layout: matched.binding.layout_name(),
                renamed_fields: renamed.iter().map(|rename_edit| rename_edit.field.name.clone()).collect(),
            });
        } else {
            debug!("{} is already migrated", class.qualified_name);
        }
        Ok(touched)
    }

    fn record_failure(
        &self,
        file: &FileId,
        plan: &RewritePlan,
        reason: String,
        report: &mut RunReport,
    ) {
        warn!("failed to rewrite {} ({}): {reason}", plan.class, plan.variant);
        report.failures.push(Failure {
            file: file.clone(),
            class: plan.class.clone(),
            variant: plan.variant.clone(),
            reason,
        });
    }
}

/// Fails when a renamed field's old name still occurs in its class, either
/// as an identifier or inside a string template the lexer could not split.
/// Names the class declares again (a parameter or local) are left alone.
fn ensure_no_leftover_uses(
    unit: &CompilationUnit,
    class_name: &str,
    renamed: &[&RenameEdit],
) -> RewriteResult<()> {
    let Some(class) = unit.class(class_name) else {
        return Ok(());
    };
    let class_text = range_text(unit.text(), class.range);
    let occurrences = FileOccurrences::build(unit.text());
    for rename in renamed {
        let name = rename.field.name.as_str();
        let inside: Vec<&Occurrence> = occurrences
            .occurrences(name)
            .iter()
            .filter(|occurrence| class.range.contains_range(occurrence.range))
            .collect();
        if inside.iter().any(|occurrence| occurrence.qualifier == Qualifier::Declaration) {
            continue;
        }
        let used = inside.iter().any(|occurrence| matches!(occurrence.qualifier, Qualifier::None | Qualifier::This));
        if used || mentions_in_template(class_text, name) {
            return Err(RewriteError::UnresolvedReference {
                name: name.to_string(),
                class: class_name.to_string(),
            });
        }
    }
    Ok(())
}

/// `$name` or `${... name ...}` anywhere in `text`; `${x.name}` is a member and does not count.
fn mentions_in_template(
    text: &str,
    name: &str,
) -> bool {
    let name = regex::escape(name);
    Regex::new(&format!(r"\$(?:{name}\b|\{{(?:[^}}]*[^.\w}}])?{name}\b)")).is_ok_and(|re| re.is_match(text))
}

/// First class not yet visited in this pass that matches `variant`.
fn next_match(
    unit: &CompilationUnit,
    variant: &VariantSpec,
    visited: &mut HashSet<String>,
) -> Option<(ClassDeclaration, MatchResult)> {
    for class in &unit.classes {
        if !visited.insert(class.qualified_name.clone()) {
            continue;
        }
        match matcher::match_class(class, variant) {
            Some(matched) => return Some((class.clone(), matched)),
            None => trace!("{} does not match variant {}", class.qualified_name, variant.name),
        }
    }
    None
}

#[cfg(test)]
#[path = "../tests/src/pipeline_tests.rs"]
mod tests;
