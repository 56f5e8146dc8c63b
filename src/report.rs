//! Flat report of an [`AggregateResult`].
//!
//! The export is one table with the columns `Categoria`, `Item`, `Quantidade`
//! and `Detalhes`. It opens with a `METADADOS` row holding the record total;
//! each category then starts with a divider row (`Item` = `---`, summary in
//! `Detalhes`) followed by one row per label.

use crate::aggregate::AggregateResult;
use crate::frequency::FrequencyTable;
use serde::Serialize;
use std::fmt;

#[cfg(feature = "csv")]
use crate::error::{AnalysisError, Result};
#[cfg(feature = "csv")]
use std::path::Path;

/// File name of the export written next to the input files.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "estatisticas_completas_ris.csv";

const DIVIDER: &str = "---";

pub const CATEGORY_METADATA: &str = "METADADOS";
pub const CATEGORY_TYPES: &str = "TIPOS DE ITENS";
pub const CATEGORY_AUTHORS: &str = "AUTORES";
pub const CATEGORY_YEARS: &str = "PUBLICAÇÕES POR ANO";
pub const CATEGORY_LANGUAGES: &str = "PUBLICAÇÕES POR IDIOMA";
pub const CATEGORY_SOURCES: &str = "PUBLICAÇÕES POR FONTE";
pub const CATEGORY_KEYWORDS: &str = "PALAVRAS-CHAVE GERAIS";
pub const CATEGORY_PHRASES_KW: &str = "PALAVRAS-CHAVE ESPECÍFICAS (KW)";
pub const CATEGORY_PHRASES_AB: &str = "PALAVRAS-CHAVE ESPECÍFICAS (AB)";

/// How many entries of the long-tailed tables are shown. `None` shows all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLimits {
    pub authors: Option<usize>,
    pub sources: Option<usize>,
    pub keywords: Option<usize>,
}

impl ReportLimits {
    /// Limits of the console summary.
    pub const fn display() -> Self {
        Self {
            authors: Some(20),
            sources: Some(20),
            keywords: Some(30),
        }
    }

    /// Limits of the CSV export.
    pub const fn export() -> Self {
        Self {
            authors: Some(50),
            sources: Some(50),
            keywords: Some(50),
        }
    }

    pub const fn unlimited() -> Self {
        Self {
            authors: None,
            sources: None,
            keywords: None,
        }
    }
}

/// One row of the flat report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Categoria")]
    pub category: String,
    #[serde(rename = "Item")]
    pub item: String,
    #[serde(rename = "Quantidade")]
    pub quantity: Option<u64>,
    #[serde(rename = "Detalhes")]
    pub details: String,
}

impl ReportRow {
    fn entry(category: &str, item: &str, quantity: u64) -> Self {
        Self {
            category: category.to_string(),
            item: item.to_string(),
            quantity: Some(quantity),
            details: String::new(),
        }
    }

    fn divider(category: &str, details: String) -> Self {
        Self {
            category: category.to_string(),
            item: DIVIDER.to_string(),
            quantity: None,
            details,
        }
    }

    /// Whether this row opens a category.
    pub fn is_divider(&self) -> bool {
        self.item == DIVIDER && self.quantity.is_none()
    }
}

fn limited(table: &FrequencyTable, limit: Option<usize>) -> Vec<(&str, u64)> {
    match limit {
        Some(n) => table.top(n),
        None => table.most_common(),
    }
}

fn ranking_summary(limit: Option<usize>, total: usize, noun: &str) -> String {
    match limit {
        Some(n) => format!("Top {n} de {total} {noun}"),
        None => format!("Total de {total} {noun}"),
    }
}

/// Flatten `result` into report rows.
pub fn build_rows(result: &AggregateResult, limits: &ReportLimits) -> Vec<ReportRow> {
    let mut rows = vec![ReportRow::entry(
        CATEGORY_METADATA,
        "Total de Registros Processados",
        result.total_records,
    )];

    let mut push_section = |category: &str, details: String, entries: Vec<(&str, u64)>| {
        rows.push(ReportRow::divider(category, details));
        rows.extend(
            entries
                .into_iter()
                .map(|(label, count)| ReportRow::entry(category, label, count)),
        );
    };

    push_section(
        CATEGORY_TYPES,
        format!("Total de {} tipos encontrados", result.types.len()),
        result.types.most_common(),
    );
    push_section(
        CATEGORY_AUTHORS,
        ranking_summary(limits.authors, result.authors.len(), "autores encontrados"),
        limited(&result.authors, limits.authors),
    );
    push_section(
        CATEGORY_YEARS,
        format!("Distribuição em {} anos", result.years.len()),
        result.years.sorted_by_label(),
    );
    push_section(
        CATEGORY_LANGUAGES,
        format!("Total de {} idiomas", result.languages.len()),
        result.languages.most_common(),
    );
    push_section(
        CATEGORY_SOURCES,
        ranking_summary(limits.sources, result.sources.len(), "fontes encontradas"),
        limited(&result.sources, limits.sources),
    );
    push_section(
        CATEGORY_KEYWORDS,
        ranking_summary(limits.keywords, result.keywords.len(), "palavras-chave"),
        limited(&result.keywords, limits.keywords),
    );
    push_section(
        CATEGORY_PHRASES_KW,
        "Ocorrências das palavras-alvo no campo de palavras-chave".to_string(),
        result.phrases_in_keywords.most_common(),
    );
    push_section(
        CATEGORY_PHRASES_AB,
        "Ocorrências das palavras-alvo nos resumos".to_string(),
        result.phrases_in_abstracts.most_common(),
    );

    rows
}

/// Write rows as comma-separated values with a header line.
#[cfg(feature = "csv")]
pub fn write_rows<W: std::io::Write>(rows: &[ReportRow], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write rows to `path` as UTF-8 CSV with a byte-order mark, so spreadsheet
/// software picks the right encoding.
///
/// # Errors
///
/// Returns [`AnalysisError::Io`] if the file cannot be created and
/// [`AnalysisError::Csv`] if writing fails.
#[cfg(feature = "csv")]
pub fn export_csv<P: AsRef<Path>>(rows: &[ReportRow], path: P) -> Result<()> {
    use std::io::Write;

    let path = path.as_ref();
    let io_error = |source| AnalysisError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = std::io::BufWriter::new(std::fs::File::create(path).map_err(io_error)?);
    file.write_all(b"\xEF\xBB\xBF").map_err(io_error)?;
    write_rows(rows, file)
}

/// Console summary of an [`AggregateResult`], rendered through [`fmt::Display`].
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    result: &'a AggregateResult,
    limits: &'a ReportLimits,
}

impl<'a> Summary<'a> {
    pub fn new(result: &'a AggregateResult, limits: &'a ReportLimits) -> Self {
        Self { result, limits }
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    entries: Vec<(&str, u64)>,
    unit: &str,
) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}:")?;
    for (label, count) in entries {
        writeln!(f, "   • {label}: {count} {unit}")?;
    }
    Ok(())
}

fn ranked_title(name: &str, limit: Option<usize>, total: usize, noun: &str) -> String {
    match limit {
        Some(n) => format!("{name} (Top {n} de {total} {noun})"),
        None => format!("{name} ({total} {noun})"),
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { result, limits } = *self;
        let rule = "=".repeat(60);

        writeln!(f, "{rule}")?;
        writeln!(f, "RELATÓRIO COMPLETO DE ANÁLISE .RIS")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total de registros processados: {}", result.total_records)?;

        write_section(
            f,
            &format!("{CATEGORY_TYPES} ({} tipos encontrados)", result.types.len()),
            result.types.most_common(),
            "ocorrências",
        )?;
        write_section(
            f,
            &ranked_title(CATEGORY_AUTHORS, limits.authors, result.authors.len(), "autores"),
            limited(&result.authors, limits.authors),
            "publicação(ões)",
        )?;
        write_section(
            f,
            &format!("{CATEGORY_YEARS} ({} anos)", result.years.len()),
            result.years.sorted_by_label(),
            "publicação(ões)",
        )?;
        write_section(
            f,
            &format!("{CATEGORY_LANGUAGES} ({} idiomas)", result.languages.len()),
            result.languages.most_common(),
            "publicação(ões)",
        )?;
        write_section(
            f,
            &ranked_title(CATEGORY_SOURCES, limits.sources, result.sources.len(), "fontes"),
            limited(&result.sources, limits.sources),
            "publicação(ões)",
        )?;
        write_section(
            f,
            &ranked_title(CATEGORY_KEYWORDS, limits.keywords, result.keywords.len(), "palavras"),
            limited(&result.keywords, limits.keywords),
            "ocorrência(s)",
        )?;
        write_section(
            f,
            "PALAVRAS-CHAVE ESPECÍFICAS EM CAMPO KW",
            result.phrases_in_keywords.most_common(),
            "ocorrência(s)",
        )?;
        write_section(
            f,
            "PALAVRAS-CHAVE ESPECÍFICAS EM RESUMOS (AB)",
            result.phrases_in_abstracts.most_common(),
            "ocorrência(s)",
        )
    }
}

/// Render the console summary as a string.
pub fn render_summary(result: &AggregateResult, limits: &ReportLimits) -> String {
    Summary::new(result, limits).to_string()
}
