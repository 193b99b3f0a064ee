//! 越南语文本规范化
//!
//! 地址与变体在比较前都要经过同一个 [`fold`]：
//! 先做 Unicode NFC 组合，再统一声调位置（旧式 "Hoà" -> 新式 "Hòa"），最后转小写。

use unicode_normalization::UnicodeNormalization;

const A_TONES: [char; 5] = ['à', 'á', 'ả', 'ã', 'ạ'];
const E_TONES: [char; 5] = ['è', 'é', 'ẻ', 'ẽ', 'ẹ'];
const Y_TONES: [char; 5] = ['ỳ', 'ý', 'ỷ', 'ỹ', 'ỵ'];
const O_TONES: [char; 5] = ['ò', 'ó', 'ỏ', 'õ', 'ọ'];
const U_TONES: [char; 5] = ['ù', 'ú', 'ủ', 'ũ', 'ụ'];

/// 开音节中的双元音：(首元音, 次元音, 次元音带调形式, 首元音带调形式)
const GLIDES: [(char, char, [char; 5], [char; 5]); 3] = [
    ('o', 'a', A_TONES, O_TONES),
    ('o', 'e', E_TONES, O_TONES),
    ('u', 'y', Y_TONES, U_TONES),
];

/// 规范化越南语文本
///
/// NFC 组合后，把开音节 `oa`/`oe`/`uy` 上标在第二个元音的声调移到第一个元音，
/// 保留大小写。带韵尾的音节（"Hoàng"）和 `qu` 组合（"Quý"）不变。
///
/// ```rust
/// use tinhthanh::normalize;
///
/// assert_eq!(normalize("Khánh Hoà"), "Khánh Hòa");
/// assert_eq!(normalize("Hoàng Mai"), "Hoàng Mai");
/// ```
pub fn normalize(text: &str) -> String {
    let mut chars: Vec<char> = text.nfc().collect();

    for i in 0..chars.len().saturating_sub(1) {
        // 后面还有字母说明不是开音节
        if chars.get(i + 2).is_some_and(|c| c.is_alphabetic()) {
            continue;
        }
        if i > 0 && lower(chars[i - 1]) == 'q' {
            continue;
        }

        let first = chars[i];
        let second = chars[i + 1];
        let second_lower = lower(second);

        for (glide, base, marked, target) in &GLIDES {
            if lower(first) != *glide {
                continue;
            }
            if let Some(tone) = marked.iter().position(|&m| m == second_lower) {
                chars[i] = with_case(target[tone], first);
                chars[i + 1] = with_case(*base, second);
                break;
            }
        }
    }

    chars.into_iter().collect()
}

/// 规范化并转小写，地址和变体都用它来比较
pub fn fold(text: &str) -> String {
    normalize(text).to_lowercase()
}

fn lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn with_case(c: char, like: char) -> char {
    if like.is_uppercase() {
        c.to_uppercase().next().unwrap_or(c)
    } else {
        c
    }
}
