//! Makefile rendering.
//!
//! Output order: preamble, one object list per group that names an
//! aggregate variable (in `object_lists` order), fixed targets, then one
//! compile rule per source file in group declaration order.
//! Everything is rendered into a `String` first so a failed run never leaves
//! a half-written Makefile behind.

mod rules;

pub use rules::{BuildRule, RuleEmitter};

use crate::config::DmakeConfig;
use crate::deps::IncludeResolver;
use crate::paths::OutputPathMapper;
use crate::scan::CollectedGroup;
use crate::templates;
use std::path::Path;

/// Render the complete Makefile for the collected groups.
pub fn render(
    root: &Path,
    config: &DmakeConfig,
    groups: &[CollectedGroup<'_>],
    release: bool,
) -> String {
    let layout = &config.layout;
    let emitter = RuleEmitter::new(
        IncludeResolver::new(root, layout),
        OutputPathMapper::new(layout),
    );

    let mut out = templates::preamble(&layout.library, config.flags.select(release));

    for collected in object_list_order(&config.object_lists, groups) {
        if let Some(variable) = &collected.group.objects_var {
            out.push_str(&emitter.object_list(variable, &collected.files));
        }
    }

    out.push_str(templates::TARGETS);

    for collected in groups {
        out.push_str(&emitter.emit(&collected.files, collected.group));
    }

    out
}

/// Groups named in `order` first, then the rest in declaration order.
fn object_list_order<'g, 'c>(
    order: &[String],
    groups: &'g [CollectedGroup<'c>],
) -> Vec<&'g CollectedGroup<'c>> {
    let named = order
        .iter()
        .filter_map(|name| groups.iter().find(|c| &c.group.name == name));
    let rest = groups.iter().filter(|c| !order.contains(&c.group.name));
    named.chain(rest).collect()
}
