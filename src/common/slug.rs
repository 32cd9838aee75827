// src/common/slug.rs

use uuid::Uuid;

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// "Barbearia do Zé & Cia" -> "barbearia-do-ze-cia"
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase).map(fold_accent) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("barbearia");
    }
    slug
}

/// Variante com sufixo curto, usada quando o slug já existe.
pub fn with_suffix(slug: &str) -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{}-{}", slug, &id[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_accents_and_collapses_separators() {
        assert_eq!(slugify("Barbearia do Zé & Cia"), "barbearia-do-ze-cia");
        assert_eq!(slugify("  Corte---Fino!! "), "corte-fino");
        assert_eq!(slugify("SALÃO Ação"), "salao-acao");
    }

    #[test]
    fn empty_names_get_a_default() {
        assert_eq!(slugify("!!!"), "barbearia");
    }

    #[test]
    fn suffix_keeps_the_base() {
        let s = with_suffix("corte-fino");
        assert!(s.starts_with("corte-fino-"));
        assert_eq!(s.len(), "corte-fino-".len() + 6);
    }
}
