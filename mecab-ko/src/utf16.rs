//! コードポイント単位でUTF-16テキストを扱うためのビュー
//!
//! ラティス上の位置はすべてコードポイント単位で数えます。
//! サロゲートペアで表現される補助平面の文字も1文字として扱われます。

/// UTF-16テキストと、コードポイント位置からコードユニット位置への対応表。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodePointString {
    units: Vec<u16>,
    index_mapping: Vec<usize>,
}

#[inline(always)]
pub(crate) const fn is_high_surrogate(unit: u16) -> bool {
    0xd800 <= unit && unit <= 0xdbff
}

#[inline(always)]
const fn is_low_surrogate(unit: u16) -> bool {
    0xdc00 <= unit && unit <= 0xdfff
}

impl CodePointString {
    /// UTF-16コードユニット列からビューを作成します。
    ///
    /// 上位サロゲートの直後のユニットは、ペアの一部として読み飛ばされます。
    pub fn from_utf16(units: Vec<u16>) -> Self {
        let mut index_mapping = Vec::with_capacity(units.len());
        let mut pos = 0;
        while pos < units.len() {
            index_mapping.push(pos);
            pos += if is_high_surrogate(units[pos]) { 2 } else { 1 };
        }
        Self {
            units,
            index_mapping,
        }
    }

    /// コードポイント数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.index_mapping.len()
    }

    /// 空文字列かどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.index_mapping.is_empty()
    }

    /// UTF-16コードユニット列への参照を返します。
    #[inline(always)]
    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    /// コードポイント位置`index`以降のコードユニット列を返します。
    ///
    /// 範囲外の場合は空のスライスを返します。
    pub fn slice_from(&self, index: usize) -> &[u16] {
        self.index_mapping
            .get(index)
            .map_or(&[][..], |&start| &self.units[start..])
    }

    /// コードポイント位置`index`の文字を、1つまたは2つのコードユニットとして返します。
    ///
    /// 範囲外の場合は空のスライスを返します。
    pub fn char_at(&self, index: usize) -> &[u16] {
        let Some(&start) = self.index_mapping.get(index) else {
            return &[];
        };
        let end = self
            .index_mapping
            .get(index + 1)
            .copied()
            .unwrap_or(self.units.len());
        &self.units[start..end]
    }

    /// コードポイント位置`index`のコードポイントを返します。
    pub fn code_point_at(&self, index: usize) -> Option<u32> {
        match *self.char_at(index) {
            [upper, lower] if is_low_surrogate(lower) => Some(
                ((u32::from(upper) - 0xd800) << 10) + (u32::from(lower) - 0xdc00) + 0x10000,
            ),
            [unit, ..] => Some(u32::from(unit)),
            [] => None,
        }
    }

    /// 文字列を`char`の列として返します。
    ///
    /// 孤立したサロゲートはU+FFFDに置き換えられるため、長さは[`Self::len()`]と一致します。
    pub fn chars(&self) -> Vec<char> {
        (0..self.len())
            .map(|i| {
                self.code_point_at(i)
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
            })
            .collect()
    }

    /// 位置`start`から`len`コードポイント分の部分文字列を返します。
    pub fn substring(&self, start: usize, len: usize) -> String {
        let Some(&begin) = self.index_mapping.get(start) else {
            return String::new();
        };
        let end = self
            .index_mapping
            .get(start + len)
            .copied()
            .unwrap_or(self.units.len());
        String::from_utf16_lossy(&self.units[begin..end])
    }

    /// 文字列全体を`String`に変換します。
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.units)
    }
}

impl From<&str> for CodePointString {
    fn from(s: &str) -> Self {
        Self::from_utf16(s.encode_utf16().collect())
    }
}
