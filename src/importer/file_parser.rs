// ==========================================
// Controle de Entregas - parser de planilhas
// ==========================================
// Suporta: Excel (.xlsx/.xls) / CSV (.csv) / texto CSV (planilha remota)
// Saída: grade de células (cabeçalho + linhas), células aparadas,
// linhas totalmente em branco descartadas
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::path::Path;

// ==========================================
// SheetData - grade de células de uma planilha
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct SheetData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetData {
    /// Sem cabeçalho ou sem linhas de dados
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Parse de texto CSV (payload da planilha remota ou arquivo já lido).
///
/// O scanner do crate csv trata aspas duplas escapadas, vírgulas e
/// quebras de linha dentro de campos entre aspas e CR+LF; depois do
/// split cada célula é aparada. Entrada vazia produz zero linhas; uma
/// quebra de linha final não gera linha em branco espúria.
pub fn parse_csv_text(text: &str) -> ImportResult<SheetData> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true) // tolera linhas com comprimentos diferentes
        .from_reader(text.as_bytes());

    let mut grid: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        grid.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }

    let mut lines = grid.into_iter();
    let headers = lines.next().unwrap_or_default();
    let rows = lines.filter(|row| !is_blank_row(row)).collect();

    Ok(SheetData { headers, rows })
}

// ==========================================
// CsvParser - arquivo CSV local
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse_file(&self, file_path: &Path) -> ImportResult<SheetData> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        if let Some(ext) = file_path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let text = std::fs::read_to_string(file_path)?;
        parse_csv_text(&text)
    }
}

// ==========================================
// ExcelParser - arquivo Excel local
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    pub fn parse_file(&self, file_path: &Path) -> ImportResult<SheetData> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let ext = file_path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)?;

        // Lê a primeira aba
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("arquivo sem abas".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut rows_iter = range.rows();
        let header_row = rows_iter
            .next()
            .ok_or_else(|| ImportError::EmptyDataset(file_path.display().to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let rows: Vec<Vec<String>> = rows_iter
            .map(|row| {
                row.iter()
                    .map(|cell| cell.to_string().trim().to_string())
                    .collect::<Vec<String>>()
            })
            .filter(|row| !is_blank_row(row))
            .collect();

        Ok(SheetData { headers, rows })
    }
}

// ==========================================
// UniversalFileParser - escolhe o parser pela extensão
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<SheetData> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_file(path),
            "xlsx" | "xls" => ExcelParser.parse_file(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
