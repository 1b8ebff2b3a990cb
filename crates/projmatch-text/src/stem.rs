/// Light suffix stemmer for inflectional English endings.
///
/// Deliberately conservative: it only needs corpus and query tokens to agree
/// on a canonical form, so it strips plural and verb endings and leaves
/// anything ambiguous alone. Tokens of three characters or fewer are never
/// touched.
pub fn stem(word: &str) -> String {
    if word.len() <= 3 {
        return word.to_string();
    }

    // Plural / third-person endings. "ies"/"ied" restore the "y" so
    // "studies" and "studied" meet "study".
    if let Some(base) = word.strip_suffix("ies")
        && base.len() >= 2
    {
        return format!("{base}y");
    }
    if let Some(base) = word.strip_suffix("ied")
        && base.len() >= 2
    {
        return format!("{base}y");
    }
    if let Some(base) = word.strip_suffix("sses") {
        return format!("{base}ss");
    }
    if let Some(base) = word.strip_suffix("es")
        && ends_with_sibilant(base)
        && base.len() >= 3
    {
        return base.to_string();
    }
    if word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return word[..word.len() - 1].to_string();
    }

    // Verb endings, undoubling the final consonant ("running" → "run",
    // "modelled" → "model").
    if let Some(base) = word.strip_suffix("ing")
        && base.len() >= 3
    {
        return undouble(base);
    }
    if let Some(base) = word.strip_suffix("ed")
        && base.len() >= 3
    {
        return undouble(base);
    }

    if let Some(base) = word.strip_suffix("ly")
        && base.len() >= 3
    {
        return base.to_string();
    }

    word.to_string()
}

fn ends_with_sibilant(base: &str) -> bool {
    base.ends_with('s')
        || base.ends_with('x')
        || base.ends_with('z')
        || base.ends_with("ch")
        || base.ends_with("sh")
}

fn undouble(base: &str) -> String {
    let bytes = base.as_bytes();
    let n = bytes.len();
    if n >= 2 && bytes[n - 1] == bytes[n - 2] && !is_vowel(bytes[n - 1]) && bytes[n - 1] != b's' {
        base[..n - 1].to_string()
    } else {
        base.to_string()
    }
}

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}
