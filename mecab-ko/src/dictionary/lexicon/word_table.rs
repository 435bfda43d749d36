//! 固定長レコードによる単語表
//!
//! 既知語と未知語は同じバイナリ形式を共有します。
//!
//! ```text
//! record (10 bytes) = i16 left_id | i16 right_id | i16 word_cost | u32 string offset
//! string table      = NUL-terminated UTF-8 "surface,feature..." strings
//! id map            = u32 count | (u32 key | u32 n | n * u32 record offset)*
//! ```

use hashbrown::HashMap;

use crate::byte_buffer::ByteBuffer;
use crate::dictionary::lexicon::param::WordParam;
use crate::utils::FromU32;

const FEATURE_OFFSET: usize = 6;

/// 単語レコード、文字列表、ID対応表の組
pub struct WordTable {
    records: ByteBuffer,
    strings: ByteBuffer,
    id_map: HashMap<u32, Vec<u32>>,
}

impl WordTable {
    /// 3つのバイナリ表から単語表を作成します。
    ///
    /// # 引数
    ///
    /// * `records` - 10バイトの単語レコード列
    /// * `strings` - NUL終端の文字列表
    /// * `id_map` - キーからレコードのバイトオフセットへの対応表
    pub fn load(records: Vec<u8>, strings: Vec<u8>, id_map: &[u8]) -> Self {
        Self {
            records: ByteBuffer::from(records),
            strings: ByteBuffer::from(strings),
            id_map: parse_id_map(id_map),
        }
    }

    /// キーに対応するレコードIDを、登録順に返します。
    #[inline(always)]
    pub fn ids(&self, key: u32) -> &[u32] {
        self.id_map.get(&key).map_or(&[][..], Vec::as_slice)
    }

    /// ID対応表に含まれるキーを返します。順序は不定です。
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.id_map.keys().copied()
    }

    /// レコードのパラメータを返します。
    ///
    /// 接続IDは符号なし16ビット、コストは符号付き16ビットとして読み込みます。
    ///
    /// # 引数
    ///
    /// * `record_id` - レコードのバイトオフセット
    #[inline(always)]
    pub fn word_param(&self, record_id: u32) -> WordParam {
        let offset = usize::from_u32(record_id);
        WordParam::new(
            self.records.get_short_at(offset) as u16,
            self.records.get_short_at(offset + 2) as u16,
            self.records.get_short_at(offset + 4),
        )
    }

    /// レコードの素性文字列を返します。
    ///
    /// レコードが範囲外の場合は空文字列を返します。
    pub fn features(&self, record_id: u32) -> String {
        let offset = usize::from_u32(record_id);
        if offset + FEATURE_OFFSET + 4 > self.records.size() {
            return String::new();
        }
        let string_offset = self.records.get_int_at(offset + FEATURE_OFFSET);
        self.strings.get_str_at(usize::from_u32(string_offset))
    }

    /// レコード数を返します。
    #[inline(always)]
    pub fn num_records(&self) -> usize {
        self.records.size() / crate::common::WORD_RECORD_LEN
    }
}

/// ID対応表を読み込みます。
///
/// 先頭の件数は読み飛ばし、バッファの終端までエントリを読み込みます。
/// 値の個数が残りのバイト数を超える場合は、読める分だけを取り込みます。
fn parse_id_map(bytes: &[u8]) -> HashMap<u32, Vec<u32>> {
    let mut buf = ByteBuffer::from(bytes.to_vec());
    let mut map: HashMap<u32, Vec<u32>> = HashMap::new();
    buf.read_int();
    while buf.position() < buf.size() {
        let key = buf.read_int();
        let n = usize::from_u32(buf.read_int());
        let remaining = buf.size().saturating_sub(buf.position()) / 4;
        let values: Vec<u32> = (0..n.min(remaining)).map(|_| buf.read_int()).collect();
        if !values.is_empty() {
            map.entry(key).or_default().extend(values);
        }
    }
    map
}
