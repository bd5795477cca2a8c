// src/common/validation.rs

use rust_decimal::Decimal;
use validator::ValidationError;

const UFS: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// Remove pontuação de documentos ("11.222.333/0001-81" -> "11222333000181").
pub fn only_digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

fn cnpj_check_digit(digits: &[u32]) -> u32 {
    // Pesos de 2 a 9, da direita para a esquerda
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| d * (2 + (i as u32 % 8)))
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}

pub fn validate_cnpj(value: &str) -> Result<(), ValidationError> {
    let digits: Vec<u32> = only_digits(value)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();

    let invalid = || error("cnpj", "CNPJ inválido.");

    if digits.len() != 14 || digits.iter().all(|d| *d == digits[0]) {
        return Err(invalid());
    }

    let first = cnpj_check_digit(&digits[..12]);
    let second = cnpj_check_digit(&digits[..13]);
    if digits[12] != first || digits[13] != second {
        return Err(invalid());
    }
    Ok(())
}

pub fn validate_ncm(value: &str) -> Result<(), ValidationError> {
    if value.len() == 8 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(error("ncm", "O NCM deve ter exatamente 8 dígitos."))
    }
}

pub fn validate_cest(value: &str) -> Result<(), ValidationError> {
    if value.len() == 7 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(error("cest", "O CEST deve ter exatamente 7 dígitos."))
    }
}

pub fn validate_uf(value: &str) -> Result<(), ValidationError> {
    if UFS.contains(&value) {
        Ok(())
    } else {
        Err(error("uf", "UF inválida."))
    }
}

/// Alíquotas são percentuais entre 0 e 100.
pub fn validate_rate(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() || *value > Decimal::ONE_HUNDRED {
        let mut err = error("range", "A alíquota deve estar entre 0 e 100.");
        err.add_param("min".into(), &0.0);
        err.add_param("max".into(), &100.0);
        return Err(err);
    }
    Ok(())
}

/// MVA de ST passa de 100% com frequência; o limite é o do NUMERIC(5,2).
pub fn validate_mva(value: &Decimal) -> Result<(), ValidationError> {
    let max = Decimal::new(99999, 2);
    if value.is_sign_negative() || *value > max {
        let mut err = error("range", "A MVA deve estar entre 0 e 999.99.");
        err.add_param("min".into(), &0.0);
        err.add_param("max".into(), &999.99);
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn accepts_valid_cnpj_with_or_without_punctuation() {
        assert!(validate_cnpj("11.222.333/0001-81").is_ok());
        assert!(validate_cnpj("11222333000181").is_ok());
    }

    #[test]
    fn rejects_cnpj_with_wrong_check_digits() {
        assert!(validate_cnpj("11.222.333/0001-82").is_err());
        assert!(validate_cnpj("11222333000191").is_err());
    }

    #[test]
    fn rejects_cnpj_with_wrong_length_or_repeated_digits() {
        assert!(validate_cnpj("1122233300018").is_err());
        assert!(validate_cnpj("00000000000000").is_err());
        assert!(validate_cnpj("").is_err());
    }

    #[test]
    fn ncm_and_cest_lengths() {
        assert!(validate_ncm("68101900").is_ok());
        assert!(validate_ncm("6810190").is_err());
        assert!(validate_ncm("6810.19.00").is_err());
        assert!(validate_cest("1000100").is_ok());
        assert!(validate_cest("100010").is_err());
    }

    #[test]
    fn uf_must_be_a_known_state() {
        assert!(validate_uf("SP").is_ok());
        assert!(validate_uf("sp").is_err());
        assert!(validate_uf("XX").is_err());
    }

    #[test]
    fn rate_bounds() {
        assert!(validate_rate(&Decimal::ZERO).is_ok());
        assert!(validate_rate(&Decimal::from_str("18.00").unwrap()).is_ok());
        assert!(validate_rate(&Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_rate(&Decimal::from_str("-0.01").unwrap()).is_err());
        assert!(validate_rate(&Decimal::from_str("100.01").unwrap()).is_err());
    }

    #[test]
    fn mva_accepts_margins_above_one_hundred() {
        assert!(validate_mva(&Decimal::from_str("140.00").unwrap()).is_ok());
        assert!(validate_mva(&Decimal::from_str("999.99").unwrap()).is_ok());
        assert!(validate_mva(&Decimal::from_str("1000.00").unwrap()).is_err());
        assert!(validate_mva(&Decimal::from_str("-1").unwrap()).is_err());
    }
}
