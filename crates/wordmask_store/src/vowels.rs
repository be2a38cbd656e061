/// Фиксированный алфавит гласных: 10 строчных + 10 прописных, включая «ё»/«Ё».
/// Принадлежность проверяется с учётом регистра.
pub const VOWELS: &str = "аеёиоуыэюяАЕЁИОУЫЭЮЯ";

/// Число гласных в слове.
pub fn vowel_count(word: &str) -> u32 {
    word.chars().filter(|c| VOWELS.contains(*c)).count() as u32
}

/// Длина слова в символах, не в байтах.
pub fn char_len(word: &str) -> u32 {
    word.chars().count() as u32
}
