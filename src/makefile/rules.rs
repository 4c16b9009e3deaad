use crate::config::SourceGroup;
use crate::deps::{DependencySet, IncludeResolver};
use crate::paths::OutputPathMapper;
use crate::scan::SourceFile;
use std::fmt::{self, Display, Formatter};

/// One compile rule: target line plus the tab-indented recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRule {
    pub object: String,
    pub source: String,
    /// Source path as the recipe sees it, after the build-dir rewrite.
    pub recipe_source: String,
    pub prerequisites: DependencySet,
    pub include_flags: String,
    pub suppress_warnings: bool,
}

impl Display for BuildRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.object, self.source)?;
        for dep in &self.prerequisites {
            write!(f, " {dep}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "\t$(CXX) {} $(CPPFLAGS) $(CFG) $(CXXFLAGS){} $(UNDEF_STRICT_ANSI) -c -o {} {}",
            self.include_flags,
            if self.suppress_warnings { " -w" } else { "" },
            self.object,
            self.recipe_source
        )?;
        writeln!(f)
    }
}

/// Builds the compile rules for a group's translation units.
pub struct RuleEmitter<'a> {
    resolver: IncludeResolver<'a>,
    mapper: OutputPathMapper<'a>,
}

impl<'a> RuleEmitter<'a> {
    pub fn new(resolver: IncludeResolver<'a>, mapper: OutputPathMapper<'a>) -> Self {
        Self { resolver, mapper }
    }

    pub fn rule(&self, file: &SourceFile, group: &SourceGroup) -> BuildRule {
        BuildRule {
            object: self.mapper.object_file(&file.path),
            source: file.path.clone(),
            recipe_source: self.mapper.build_dir(&file.path),
            prerequisites: self.resolver.resolve(&file.path),
            include_flags: group.include_flags.clone(),
            suppress_warnings: group.vendored,
        }
    }

    /// One rule per file, in collection order.
    pub fn emit(&self, files: &[SourceFile], group: &SourceGroup) -> String {
        let mut out = String::new();
        for file in files {
            let rule = self.rule(file, group);
            tracing::debug!(
                source = %rule.source,
                prerequisites = rule.prerequisites.len(),
                "emitting rule"
            );
            out.push_str(&rule.to_string());
        }
        out
    }

    /// `NAME =` padded to 14 columns, one object per continuation line.
    pub fn object_list(&self, variable: &str, files: &[SourceFile]) -> String {
        let objects: Vec<String> = files
            .iter()
            .map(|file| self.mapper.object_file(&file.path))
            .collect();
        format!(
            "{:<14}{}\n\n",
            format!("{variable} ="),
            objects.join(format!(" \\\n{:14}", "").as_str())
        )
    }
}
