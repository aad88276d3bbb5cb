// ==========================================
// Internacionalização (i18n)
// ==========================================
// Usa a biblioteca rust-i18n
// Suporta português brasileiro (padrão) e inglês
// ==========================================
// Nota: o macro rust_i18n::i18n! é inicializado em lib.rs
// ==========================================

/// Retorna o idioma atual
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Define o idioma
///
/// # Parâmetros
/// - locale: código do idioma ("pt-BR" ou "en")
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Traduz uma mensagem (sem parâmetros)
///
/// # Exemplo
/// ```no_run
/// use controle_entregas::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Traduz uma mensagem (com parâmetros)
///
/// # Exemplo
/// ```no_run
/// use controle_entregas::i18n::t_with_args;
/// let msg = t_with_args("import.file_not_found", &[("path", "/tmp/dados.csv")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // O locale do rust-i18n é estado global e os testes rodam em paralelo;
    // serializa os testes de i18n para evitar interferência mútua.
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("pt-BR");
        assert_eq!(current_locale(), "pt-BR");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("pt-BR");
        let msg = t("common.success");
        assert_eq!(msg, "Operação concluída");

        set_locale("en");
        let msg = t("common.success");
        assert_eq!(msg, "Operation successful");

        set_locale("pt-BR");
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("pt-BR");
        let msg = t_with_args("import.file_not_found", &[("path", "/tmp/dados.csv")]);
        assert!(msg.contains("/tmp/dados.csv"));
        assert!(msg.contains("Arquivo não encontrado"));

        set_locale("en");
        let msg = t_with_args("import.file_not_found", &[("path", "/tmp/dados.csv")]);
        assert!(msg.contains("/tmp/dados.csv"));
        assert!(msg.contains("File not found"));

        set_locale("pt-BR");
    }
}
