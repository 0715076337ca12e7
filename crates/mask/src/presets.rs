//! Named masks for common Brazilian document and contact formats.

/// `(name, alias, pattern)`.
pub const PRESETS: &[(&str, &str, &str)] = &[
    ("CPF", "document", "000.000.000-00"),
    ("CNPJ", "tax_id", "00.000.000/0000-00"),
    ("TELEFONE", "phone", "(00) 00000-0000"),
    ("TELEFONE_FIXO", "landline", "(00) 0000-0000"),
    ("CEP", "postal_code", "00000-000"),
    ("DATA", "date", "00/00/0000"),
    ("HORA", "time", "00:00"),
    ("DATA_HORA", "date_time", "00/00/0000 00:00"),
    ("PLACA_ANTIGA", "plate", "AAA-0000"),
    ("PLACA_MERCOSUL", "plate_mercosul", "AAA-0A00"),
    ("CARTAO", "card", "0000 0000 0000 0000"),
    ("CVV", "security_code", "000"),
    ("CVV4", "security_code4", "0000"),
    ("VALIDADE_CARTAO", "card_expiry", "00/00"),
];

pub const CPF: &str = "000.000.000-00";
pub const CNPJ: &str = "00.000.000/0000-00";
pub const TELEFONE: &str = "(00) 00000-0000";
pub const CEP: &str = "00000-000";
pub const DATA: &str = "00/00/0000";

/// Case-insensitive lookup by preset name. Aliases are not names.
///
/// ```
/// assert_eq!(mask::presets::lookup("cpf"), Some("000.000.000-00"));
/// assert_eq!(mask::presets::lookup("phone"), None);
/// assert_eq!(mask::presets::lookup("0000"), None);
/// ```
pub fn lookup(name: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(n, _, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, _, pattern)| *pattern)
}

/// Case-insensitive lookup by alias only.
///
/// ```
/// assert_eq!(mask::presets::lookup_alias("Phone"), Some("(00) 00000-0000"));
/// assert_eq!(mask::presets::lookup_alias("TELEFONE"), None);
/// ```
pub fn lookup_alias(alias: &str) -> Option<&'static str> {
    PRESETS
        .iter()
        .find(|(_, a, _)| a.eq_ignore_ascii_case(alias))
        .map(|(_, _, pattern)| *pattern)
}
