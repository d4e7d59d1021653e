// This file is part of chess-tournament.
//
// chess-tournament is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// chess-tournament is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::info;

use crate::error::Result;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    Text,
    Html,
    Both,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Html => write!(f, "html"),
            Self::Both => write!(f, "text and html"),
        }
    }
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "1" | "text" | "txt" => Ok(Self::Text),
            "2" | "html" => Ok(Self::Html),
            "3" | "both" => Ok(Self::Both),
            _ => Err(anyhow::Error::msg(format!("invalid export format: {value}"))),
        }
    }
}

/// Writes reports into one directory.
#[derive(Clone, Debug)]
pub struct Exporter {
    directory: PathBuf,
}

impl Exporter {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Writes `report` as `<name>.txt`, `<name>.html` or both and returns the
    /// paths written.
    ///
    /// # Errors
    ///
    /// If the directory can't be created or a file can't be written.
    pub fn export(&self, name: &str, report: &str, format: Format) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.directory)?;
        let stem = file_stem(name);
        let mut written = Vec::new();

        if matches!(format, Format::Text | Format::Both) {
            let path = self.directory.join(format!("{stem}.txt"));
            fs::write(&path, format!("{report}\n"))?;
            written.push(path);
        }

        if matches!(format, Format::Html | Format::Both) {
            let path = self.directory.join(format!("{stem}.html"));
            fs::write(&path, html(name, report))?;
            written.push(path);
        }

        for path in &written {
            info!("exported {}", path.display());
        }
        Ok(written)
    }
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|character| {
            if character.is_alphanumeric() || character == '-' {
                character
            } else {
                '_'
            }
        })
        .collect()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(character),
        }
    }
    escaped
}

fn html(title: &str, report: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: Arial, sans-serif; margin: 20px; }}
h1 {{ color: #333; }}
pre {{ background-color: #f4f4f4; padding: 10px; border-radius: 5px; }}
</style>
</head>
<body>
<h1>{title}</h1>
<pre>{report}</pre>
</body>
</html>
"#,
        title = escape(title),
        report = escape(report),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_formats_are_written() -> anyhow::Result<()> {
        let directory = tempfile::tempdir()?;
        let exporter = Exporter::new(directory.path().join("reports"));

        let written = exporter.export("players of Open", "Zoe <Z> & Adam", Format::Both)?;

        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("players_of_Open.txt"));
        assert_eq!(fs::read_to_string(&written[0])?, "Zoe <Z> & Adam\n");

        let html = fs::read_to_string(&written[1])?;
        assert!(html.contains("<pre>Zoe &lt;Z&gt; &amp; Adam</pre>"));
        Ok(())
    }

    #[test]
    fn formats_parse_from_menu_choices() -> anyhow::Result<()> {
        assert_eq!(Format::from_str("1")?, Format::Text);
        assert_eq!(Format::from_str("HTML")?, Format::Html);
        assert_eq!(Format::from_str(" 3 ")?, Format::Both);
        assert!(Format::from_str("4").is_err());
        Ok(())
    }
}
