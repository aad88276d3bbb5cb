// ==========================================
// Controle de Entregas - resolução tolerante de colunas
// ==========================================
// As planilhas de origem chegam com cabeçalhos inconsistentes e às vezes
// renomeados. A resolução segue três fases, nesta ordem:
//   1. igualdade exata entre formas normalizadas (minúsculas, só
//      alfanuméricos)
//   2. continência de substring entre forma normalizada e apelido
//   3. amostragem de conteúdo: pontua cada coluna contra um predicado
//      nas primeiras linhas de dados e aceita a melhor pontuação quando
//      ela cobre pelo menos metade da amostra
// Coluna não resolvida não é erro: o campo fica vazio em todos os
// registros.
// ==========================================

use regex::Regex;

/// Tamanho máximo da amostra da fase 3
const SAMPLE_SIZE: usize = 10;

/// Normaliza um cabeçalho ou apelido: minúsculas, só ASCII alfanumérico.
///
/// "Nro. Entrega" → "nroentrega"; "Situação" → "situao" (acentos caem,
/// igual nos dois lados da comparação).
pub fn normalize_token(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Resolve o índice da coluna de um campo.
///
/// # Parâmetros
/// - headers: linha de cabeçalho da planilha
/// - aliases: nomes aceitos para o campo, em ordem de preferência
/// - predicate: predicado de conteúdo para a fase de amostragem (opcional)
/// - sample_rows: linhas de dados para a amostragem
///
/// # Retorno
/// - Some(índice): coluna a usar
/// - None: não encontrada (o campo mapeado fica vazio)
pub fn resolve_column(
    headers: &[String],
    aliases: &[&str],
    predicate: Option<&Regex>,
    sample_rows: &[Vec<String>],
) -> Option<usize> {
    if let Some(idx) = find_by_alias(headers, aliases) {
        return Some(idx);
    }

    if let Some(regex) = predicate {
        return detect_by_sample(headers.len(), regex, sample_rows);
    }

    None
}

/// Fases 1 e 2: igualdade exata, depois continência de substring.
fn find_by_alias(headers: &[String], aliases: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = headers.iter().map(|h| normalize_token(h)).collect();

    // fase 1: igualdade exata
    for alias in aliases {
        let target = normalize_token(alias);
        if target.is_empty() {
            continue;
        }
        if let Some(idx) = normalized.iter().position(|h| *h == target) {
            return Some(idx);
        }
    }

    // fase 2: substring nos dois sentidos
    for alias in aliases {
        let target = normalize_token(alias);
        if target.is_empty() {
            continue;
        }
        if let Some(idx) = normalized
            .iter()
            .position(|h| !h.is_empty() && (h.contains(&target) || target.contains(h.as_str())))
        {
            return Some(idx);
        }
    }

    None
}

/// Fase 3: amostragem de conteúdo.
///
/// Conta, por coluna, quantas células das primeiras `SAMPLE_SIZE` linhas
/// satisfazem o predicado; escolhe a maior pontuação (primeira coluna em
/// caso de empate) se ela atingir pelo menos a metade (arredondada para
/// cima) da amostra.
fn detect_by_sample(columns: usize, predicate: &Regex, rows: &[Vec<String>]) -> Option<usize> {
    let total = rows.len().min(SAMPLE_SIZE);
    if total == 0 || columns == 0 {
        return None;
    }

    let mut best_idx: Option<usize> = None;
    let mut best_score = 0usize;

    for col in 0..columns {
        let score = rows[..total]
            .iter()
            .filter(|row| {
                let cell = row.get(col).map(|c| c.trim()).unwrap_or("");
                predicate.is_match(cell)
            })
            .count();

        if score > best_score {
            best_score = score;
            best_idx = Some(col);
        }
    }

    let threshold = total.div_ceil(2);
    if best_score >= threshold {
        best_idx
    } else {
        None
    }
}
