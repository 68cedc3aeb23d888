//! Reading sources and reporting parse errors.

use std::fs;
use std::io::Read;
use std::path::Path;

use miette::{miette, LabeledSpan, NamedSource, Report};
use treearbo_parser::{string_to_tree, StringToTreeError};
use treearbo_tree::Tree;

use crate::config::Config;

/// A source text and the URI it is reported under.
pub struct Source {
    pub uri: String,
    pub text: String,
}

impl Source {
    /// Read a file, or stdin for `-`.
    pub fn read(path: &Path, config: &Config) -> miette::Result<Self> {
        if path == Path::new("-") {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| miette!("Failed to read stdin: {}", e))?;
            tracing::debug!(bytes = text.len(), "read stdin");
            return Ok(Self {
                uri: config.stdin_uri.clone(),
                text,
            });
        }

        let text = fs::read_to_string(path)
            .map_err(|e| miette!("Failed to read {}: {}", path.display(), e))?;
        tracing::debug!(file = %path.display(), bytes = text.len(), "read file");

        Ok(Self {
            uri: path.display().to_string(),
            text,
        })
    }

    /// Parse the source, turning syntax errors into labelled reports.
    pub fn parse(&self) -> miette::Result<Tree> {
        let tree = string_to_tree(&self.text, &self.uri).map_err(|err| self.report(&err))?;
        tracing::debug!(uri = %self.uri, nodes = tree.kids().len(), "parsed");
        Ok(tree)
    }

    /// Build a report pointing at the offending characters.
    pub fn report(&self, err: &StringToTreeError) -> Report {
        let Some(span) = err.span() else {
            return miette!("{}", err);
        };

        let start = span.offset().min(self.text.len());
        let end = self.text[start..]
            .char_indices()
            .nth(span.length())
            .map_or(self.text.len(), |(at, _)| start + at);

        miette!(
            labels = vec![LabeledSpan::at(start..end, "here")],
            "{}",
            err
        )
        .with_source_code(NamedSource::new(&self.uri, self.text.clone()))
    }
}
