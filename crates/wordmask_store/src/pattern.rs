use anyhow::Result;
use regex::Regex;

/// Компилятор шаблонов: '*' и '?' пользователя переводятся в маску
/// хранилища ('%' — любая последовательность, '_' — один символ)
/// прямой заменой символов, без экранирования остального. Следствие:
/// литеральные '%' и '_' в шаблоне ведут себя как метасимволы маски,
/// искать их буквально нельзя.
pub fn compile(pattern: &str) -> String {
    pattern
        .chars()
        .map(|c| match c {
            '*' => '%',
            '?' => '_',
            c => c,
        })
        .collect()
}

/// Скомпилировать маску в якорный regex: '%' → ".*", '_' → ".",
/// метасимволы regex в литеральной части экранируются.
pub fn mask_to_regex(mask: &str) -> Result<Regex> {
    let mut rx = String::from("^");
    for ch in mask.chars() {
        match ch {
            '%' => rx.push_str(".*"),
            '_' => rx.push('.'),
            c => {
                if "\\.^$|()[]{}+*?".contains(c) {
                    rx.push('\\');
                }
                rx.push(c);
            }
        }
    }
    rx.push('$');
    Ok(Regex::new(&rx)?)
}

/// Границы длины, выводимые из маски: без '%' маска совпадает только со
/// словами ровно своей длины, с '%' — не короче числа прочих символов.
/// Дешёвый префильтр по индексу длин до regex-проверки.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: u32,
    pub exact: Option<u32>,
}

impl LengthBounds {
    pub fn unbounded() -> Self {
        Self { min: 0, exact: None }
    }
}

pub fn mask_length_bounds(mask: &str) -> LengthBounds {
    let mut min = 0u32;
    let mut many = false;
    for ch in mask.chars() {
        if ch == '%' {
            many = true;
        } else {
            min += 1;
        }
    }
    LengthBounds {
        min,
        exact: (!many).then_some(min),
    }
}
