use anyhow::Result;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// Читает список слов: по слову на строке, края обрезаются, пустые строки
/// пропускаются. Перекодировка — забота внешнего конвертера, здесь
/// ожидается готовый UTF-8.
pub fn read_words(path: &str) -> Result<Vec<String>> {
    let f = File::open(path)?;
    let br = BufReader::new(f);
    let mut out = Vec::new();
    for line in br.lines() {
        let line = line?;
        let w = line.trim();
        if w.is_empty() {
            continue;
        }
        out.push(w.to_string());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_words_trims_and_skips_blanks() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("dict.txt");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "кот").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "  кит  ").unwrap();
        writeln!(f, "   ").unwrap();
        writeln!(f, "корова").unwrap();
        drop(f);

        let words = read_words(path.to_str().unwrap()).unwrap();
        assert_eq!(words, vec!["кот", "кит", "корова"]);
    }
}
