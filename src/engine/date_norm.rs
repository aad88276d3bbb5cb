// ==========================================
// Controle de Entregas - normalização de datas
// ==========================================
// As planilhas chegam com datas em três formatos: ISO (YYYY-MM-DD, com ou
// sem horário), brasileiro (D/M/YYYY) e o padrão de exportação do Excel
// americano (M/D/YY). A desambiguação é dirigida pelo comprimento do ano:
// ano de 4 dígitos = dia primeiro; ano de 2 dígitos = mês primeiro.
// Essa regra é contrato do filtro de datas e não pode mudar.
// ==========================================

use regex::Regex;
use std::sync::LazyLock;

// ISO, com sufixo de horário opcional
static RE_ISO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").unwrap());

// D/M/YYYY ou DD/MM/YYYY (ano de 4 dígitos, sufixo tolerado)
static RE_DAY_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})").unwrap());

// M/D/YY ou MM/DD/YY (exatamente dois pares e ano de 2 dígitos, ancorado)
static RE_MONTH_FIRST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{2})$").unwrap());

/// Normaliza uma data em formato variado para a chave `YYYY-MM-DD`.
///
/// Formatos tentados em ordem, vence o primeiro que casar:
/// 1. `YYYY-MM-DD[ hh:mm:ss]` → primeiros 10 caracteres
/// 2. `D/M/YYYY` → remontado como dia-primeiro
/// 3. `M/D/YY` → remontado como mês-primeiro, ano prefixado com "20"
///
/// Entrada não reconhecida → `None` (o registro sai de qualquer filtro de
/// data ativo; nunca é erro).
pub fn normalize_day(value: &str) -> Option<String> {
    let dt = value.trim();

    if RE_ISO.is_match(dt) {
        return Some(dt[..10].to_string());
    }

    if let Some(caps) = RE_DAY_FIRST.captures(dt) {
        let day = &caps[1];
        let month = &caps[2];
        let year = &caps[3];
        return Some(format!("{}-{:0>2}-{:0>2}", year, month, day));
    }

    if let Some(caps) = RE_MONTH_FIRST.captures(dt) {
        let month = &caps[1];
        let day = &caps[2];
        let year = &caps[3];
        return Some(format!("20{}-{:0>2}-{:0>2}", year, month, day));
    }

    None
}

/// Normaliza uma data em formato variado para a chave mensal `YYYY-MM`.
///
/// Mesmas regras de `normalize_day`; o dia é descartado.
pub fn normalize_month(value: &str) -> Option<String> {
    normalize_day(value).map(|day| day[..7].to_string())
}

/// Formata uma data reconhecida como `DD/MM/YYYY` para exibição.
///
/// Entrada não reconhecida é devolvida como veio (aparada).
pub fn format_br(value: &str) -> String {
    match normalize_day(value) {
        Some(iso) => format!("{}/{}/{}", &iso[8..10], &iso[5..7], &iso[..4]),
        None => value.trim().to_string(),
    }
}
