//! バイト列を操作するためのバッファ
//!
//! 辞書のバイナリ形式はすべてこのバッファの上に構築されています。
//! リトルエンディアンの整数と、NUL終端のUTF-8文字列の読み書きを提供します。
//!
//! # 範囲外読み込み
//!
//! バッファの終端を越える数値の読み込みは`0`を返し、文字列の読み込みは終端で停止します。
//! いずれもエラーにはなりません。
//! 切り詰められたファイルを読み込んだ場合は、誤った値が黙って返される点に注意してください。

use crate::errors::{MecabError, Result};

const DEFAULT_SIZE: usize = 1024 * 1024;

/// カーソル付きの伸長可能なバイトバッファ。
///
/// `buffer.len()`はバッファの確保サイズを表し、書き込み位置とは独立しています。
/// 書き込み時に容量が不足すると、サイズを2倍に拡張します。
#[derive(Clone, Debug)]
pub struct ByteBuffer {
    buffer: Vec<u8>,
    position: usize,
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::with_size(DEFAULT_SIZE)
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(buffer: Vec<u8>) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }
}

impl ByteBuffer {
    /// 1MiBのゼロ埋めバッファを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定サイズのゼロ埋めバッファを作成します。
    pub fn with_size(size: usize) -> Self {
        Self {
            buffer: vec![0; size],
            position: 0,
        }
    }

    /// バッファの確保サイズを返します。
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    /// 現在のカーソル位置を返します。
    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// カーソル位置を設定します。
    #[inline(always)]
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    /// バッファ全体への参照を返します。
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    fn reallocate(&mut self) {
        let new_len = (self.buffer.len() * 2).max(1);
        self.buffer.resize(new_len, 0);
    }

    /// バッファを書き込み位置で切り詰め、その内容を返します。
    ///
    /// シリアライズの直前に呼び出します。
    pub fn shrink(&mut self) -> &[u8] {
        self.buffer.truncate(self.position);
        &self.buffer
    }

    /// バッファを書き込み位置で切り詰め、内部のバイト列を取り出します。
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.buffer.truncate(self.position);
        self.buffer
    }

    /// 1バイトを書き込みます。
    pub fn put(&mut self, b: u8) {
        if self.buffer.len() < self.position + 1 {
            self.reallocate();
        }
        self.buffer[self.position] = b;
        self.position += 1;
    }

    /// カーソル位置から1バイトを読み込み、カーソルを進めます。
    pub fn get(&mut self) -> u8 {
        let index = self.position;
        self.position += 1;
        self.get_at(index)
    }

    /// 指定位置の1バイトを読み込みます。範囲外の場合は`0`を返します。
    #[inline(always)]
    pub fn get_at(&self, index: usize) -> u8 {
        self.buffer.get(index).copied().unwrap_or(0)
    }

    /// 16ビット値をリトルエンディアンで書き込みます。
    ///
    /// 符号付きのコストと符号なしの文脈IDの両方を受け付けるため、
    /// 引数は`-32768..=65535`の範囲でなければなりません。
    ///
    /// # エラー
    ///
    /// 値が16ビットに収まらない場合、[`MecabError`]が返されます。
    pub fn put_short(&mut self, num: i32) -> Result<()> {
        if !(i32::from(i16::MIN)..=i32::from(u16::MAX)).contains(&num) {
            return Err(MecabError::invalid_argument(
                "num",
                format!("{num} is over short value"),
            ));
        }
        // Negative values are stored as their two's complement.
        let [lower, upper] = (num as u16).to_le_bytes();
        self.put(lower);
        self.put(upper);
        Ok(())
    }

    /// カーソル位置から符号付き16ビット値を読み込み、カーソルを2進めます。
    pub fn get_short(&mut self) -> i16 {
        let index = self.position;
        self.position += 2;
        self.get_short_at(index)
    }

    /// 指定位置から符号付き16ビット値を読み込みます。
    #[inline(always)]
    pub fn get_short_at(&self, index: usize) -> i16 {
        match self.buffer.get(index..index + 2) {
            Some(b) => i16::from_le_bytes([b[0], b[1]]),
            None => 0,
        }
    }

    /// 32ビット値をリトルエンディアンで書き込みます。
    pub fn put_int(&mut self, num: u32) {
        for b in num.to_le_bytes() {
            self.put(b);
        }
    }

    /// カーソル位置から符号なし32ビット値を読み込み、カーソルを4進めます。
    pub fn get_int(&mut self) -> u32 {
        let index = self.position;
        self.position += 4;
        self.get_int_at(index)
    }

    /// ID対応表の読み込み用に、カーソル位置から32ビット値を読み込みます。
    #[inline(always)]
    pub fn read_int(&mut self) -> u32 {
        self.get_int()
    }

    /// 指定位置から符号なし32ビット値を読み込みます。
    #[inline(always)]
    pub fn get_int_at(&self, index: usize) -> u32 {
        match self.buffer.get(index..index + 4) {
            Some(b) => u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            None => 0,
        }
    }

    /// UTF-16テキストをUTF-8に変換し、NUL終端付きで書き込みます。
    ///
    /// # エラー
    ///
    /// 上位サロゲートの直後に下位サロゲートが続かない場合、[`MecabError`]が返されます。
    pub fn put_string(&mut self, units: &[u16]) -> Result<()> {
        for b in utf16_to_utf8(units)? {
            self.put(b);
        }
        self.put(0);
        Ok(())
    }

    /// 文字列をUTF-8のままNUL終端付きで書き込みます。
    pub fn put_str(&mut self, s: &str) {
        for &b in s.as_bytes() {
            self.put(b);
        }
        self.put(0);
    }

    /// カーソル位置からNUL終端文字列を読み込みます。
    ///
    /// カーソルは読み込んだ終端の直後に移動します。
    pub fn get_string(&mut self) -> Vec<u16> {
        self.get_string_at(self.position)
    }

    /// 指定位置からNUL終端文字列を読み込み、UTF-16テキストとして返します。
    ///
    /// バッファの終端に達した場合は、そこまでの内容を返します。
    pub fn get_string_at(&mut self, mut index: usize) -> Vec<u16> {
        let mut bytes = vec![];
        while index < self.buffer.len() {
            let ch = self.buffer[index];
            index += 1;
            if ch == 0 {
                break;
            }
            bytes.push(ch);
        }
        self.position = index;
        utf8_to_utf16(&bytes)
    }

    /// 指定位置からNUL終端文字列を読み込み、`String`として返します。
    ///
    /// カーソルは移動しません。
    pub fn get_str_at(&self, index: usize) -> String {
        let end = self.buffer[index.min(self.buffer.len())..]
            .iter()
            .position(|&b| b == 0)
            .map_or(self.buffer.len(), |p| index + p);
        if index >= end {
            return String::new();
        }
        String::from_utf16_lossy(&utf8_to_utf16(&self.buffer[index..end]))
    }
}

/// UTF-16テキストをUTF-8バイト列に変換します。
///
/// 対になっていない下位サロゲートは3バイトの値としてそのまま符号化されます。
pub(crate) fn utf16_to_utf8(units: &[u16]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(units.len() * 3);
    let mut i = 0;
    while i < units.len() {
        let unit = u32::from(units[i]);
        i += 1;

        let code = if (0xd800..=0xdbff).contains(&unit) {
            match units.get(i).map(|&u| u32::from(u)) {
                Some(lower @ 0xdc00..=0xdfff) => {
                    i += 1;
                    ((unit - 0xd800) << 10) + 0x10000 + (lower - 0xdc00)
                }
                _ => {
                    return Err(MecabError::invalid_argument(
                        "units",
                        "Malformed surrogate pair",
                    ))
                }
            }
        } else {
            unit
        };

        if code < 0x80 {
            bytes.push(code as u8);
        } else if code < 1 << 11 {
            bytes.push(((code >> 6) | 0xc0) as u8);
            bytes.push(((code & 0x3f) | 0x80) as u8);
        } else if code < 1 << 16 {
            bytes.push(((code >> 12) | 0xe0) as u8);
            bytes.push((((code >> 6) & 0x3f) | 0x80) as u8);
            bytes.push(((code & 0x3f) | 0x80) as u8);
        } else {
            bytes.push(((code >> 18) | 0xf0) as u8);
            bytes.push((((code >> 12) & 0x3f) | 0x80) as u8);
            bytes.push((((code >> 6) & 0x3f) | 0x80) as u8);
            bytes.push(((code & 0x3f) | 0x80) as u8);
        }
    }
    Ok(bytes)
}

/// UTF-8バイト列をUTF-16テキストに変換します。
///
/// 不正なバイト列に対しても失敗せず、欠けた継続バイトは`0`として扱います。
pub(crate) fn utf8_to_utf16(bytes: &[u8]) -> Vec<u16> {
    let at = |i: usize| u32::from(bytes.get(i).copied().unwrap_or(0));

    let mut units = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b1 = at(i);
        let code = if b1 < 0x80 {
            i += 1;
            b1
        } else if b1 >> 5 == 0x06 {
            let code = ((b1 & 0x1f) << 6) | (at(i + 1) & 0x3f);
            i += 2;
            code
        } else if b1 >> 4 == 0x0e {
            let code = ((b1 & 0x0f) << 12) | ((at(i + 1) & 0x3f) << 6) | (at(i + 2) & 0x3f);
            i += 3;
            code
        } else {
            let code = ((b1 & 0x07) << 18)
                | ((at(i + 1) & 0x3f) << 12)
                | ((at(i + 2) & 0x3f) << 6)
                | (at(i + 3) & 0x3f);
            i += 4;
            code
        };

        if code < 0x10000 {
            units.push(code as u16);
        } else {
            let code = code - 0x10000;
            units.push((0xd800 | (code >> 10)) as u16);
            units.push((0xdc00 | (code & 0x3ff)) as u16);
        }
    }
    units
}
