//! Description emphasis.
//!
//! Source descriptions are plain prose. Before they reach a card, each
//! sentence gets at most one `**emphasized**` word so the renderer can pick
//! it out in the card's highlight colour. The word is chosen by, in order:
//!
//! 1. The first entry of [`KEYWORDS`] that appears as a whole word
//! 2. The first capitalized word of four or more letters not at sentence start
//! 3. The longest word, if it has more than five characters
//!
//! Sentences that already contain `**` are left alone.

/// Words worth highlighting, in priority order.
pub const KEYWORDS: [&str; 33] = [
    "história",
    "tradição",
    "fundada",
    "prestígio",
    "excelência",
    "pesquisa",
    "inovação",
    "internacional",
    "campus",
    "cursos",
    "reconhecimento",
    "qualidade",
    "alunos",
    "cidade",
    "cultura",
    "arte",
    "ciência",
    "tecnologia",
    "laboratórios",
    "biblioteca",
    "multidisciplinar",
    "estatal",
    "pública",
    "renomada",
    "antiga",
    "moderna",
    "sustentabilidade",
    "oportunidades",
    "intercâmbio",
    "vivência",
    "Europa",
    "Itália",
    "Mundo",
];

const MARKER: &str = "**";

/// Shortest proper noun worth highlighting, in characters.
const PROPER_NOUN_MIN: usize = 4;

/// Longest-word fallback only applies above this many characters.
const LONG_WORD_MIN: usize = 5;

/// Adds one emphasis marker pair per sentence.
///
/// # Example
///
/// ```
/// use unimatch::repository::emphasis::emphasize;
///
/// assert_eq!(
///     emphasize("Uma das mais antigas da Europa. Fica em Bologna."),
///     "Uma das mais antigas da **Europa**. Fica em **Bologna**."
/// );
/// ```
#[must_use]
pub fn emphasize(text: &str) -> String {
    sentences(text).into_iter().map(emphasize_sentence).collect()
}

fn emphasize_sentence(sentence: &str) -> String {
    if sentence.contains(MARKER) {
        return sentence.to_string();
    }
    let words = word_spans(sentence);

    let pick = keyword_word(sentence, &words)
        .or_else(|| proper_noun(sentence, &words))
        .or_else(|| longest_word(sentence, &words));

    match pick {
        Some((start, end)) => format!(
            "{}{MARKER}{}{MARKER}{}",
            &sentence[..start],
            &sentence[start..end],
            &sentence[end..]
        ),
        None => sentence.to_string(),
    }
}

fn keyword_word(sentence: &str, words: &[(usize, usize)]) -> Option<(usize, usize)> {
    KEYWORDS.iter().find_map(|keyword| {
        let keyword = keyword.to_lowercase();
        words
            .iter()
            .copied()
            .find(|&(start, end)| sentence[start..end].to_lowercase() == keyword)
    })
}

fn proper_noun(sentence: &str, words: &[(usize, usize)]) -> Option<(usize, usize)> {
    words.iter().skip(1).copied().find(|&(start, end)| {
        let preceded_by_space = sentence[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        let mut chars = sentence[start..end].chars();
        let capitalized = chars.next().is_some_and(char::is_uppercase);
        let rest: Vec<char> = chars.collect();
        preceded_by_space
            && capitalized
            && rest.len() + 1 >= PROPER_NOUN_MIN
            && rest.iter().all(|c| c.is_lowercase())
    })
}

fn longest_word(sentence: &str, words: &[(usize, usize)]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, usize)> = None;
    for &(start, end) in words {
        let length = sentence[start..end].chars().count();
        if best.map_or(true, |(_, _, longest)| length > longest) {
            best = Some((start, end, length));
        }
    }
    best.filter(|&(_, _, length)| length > LONG_WORD_MIN)
        .map(|(start, end, _)| (start, end))
}

/// Byte ranges of maximal alphanumeric runs.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (index, c) in text.char_indices() {
        match (c.is_alphanumeric(), start) {
            (true, None) => start = Some(index),
            (false, Some(s)) => {
                spans.push((s, index));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

/// Splits after each run of `.`, `!` or `?`, keeping the terminators and any
/// trailing fragment.
fn sentences(text: &str) -> Vec<&str> {
    let is_terminator = |c: char| matches!(c, '.' | '!' | '?');
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((index, c)) = chars.next() {
        if !is_terminator(c) {
            continue;
        }
        let mut end = index + c.len_utf8();
        while let Some(&(next_index, next)) = chars.peek() {
            if !is_terminator(next) {
                break;
            }
            end = next_index + next.len_utf8();
            chars.next();
        }
        out.push(&text[start..end]);
        start = end;
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_priority_follows_list_order() {
        // "pesquisa" precedes "cidade" in the keyword list
        assert_eq!(
            emphasize("Na cidade há pesquisa de ponta."),
            "Na cidade há **pesquisa** de ponta."
        );
    }

    #[test]
    fn keywords_match_whole_words_case_insensitively() {
        assert_eq!(emphasize("Artesanato local."), "**Artesanato** local.");
        assert_eq!(emphasize("ARTE e música!"), "**ARTE** e música!");
    }

    #[test]
    fn proper_noun_must_not_start_the_sentence() {
        assert_eq!(emphasize("Fica perto de Verona."), "Fica perto de **Verona**.");
    }

    #[test]
    fn longest_word_is_the_last_resort() {
        assert_eq!(emphasize("um lugar acolhedor e bom."), "um lugar **acolhedor** e bom.");
        assert_eq!(emphasize("um lugar bom."), "um lugar bom.");
    }

    #[test]
    fn emphasized_sentences_are_untouched() {
        let text = "Já tem **destaque** aqui. Outra frase sobre cultura";
        assert_eq!(emphasize(text), "Já tem **destaque** aqui. Outra frase sobre **cultura**");
    }

    #[test]
    fn sentence_split_keeps_terminator_runs() {
        assert_eq!(sentences("Olá!! Tudo bem? fim"), vec!["Olá!!", " Tudo bem?", " fim"]);
        assert!(sentences("").is_empty());
    }
}
