//! 文字カテゴリ定義
//!
//! このモジュールは、未知語処理に用いる文字カテゴリの情報を管理します。
//! カテゴリの属性は[`InvokeDefinitionMap`]に、文字からカテゴリへの対応は
//! [`CharacterDefinition`]に保持されます。

use hashbrown::HashMap;

use crate::byte_buffer::ByteBuffer;
use crate::common::{DEFAULT_CATEGORY, NUM_UTF16_UNITS};
use crate::errors::{MecabError, Result};
use crate::utf16::is_high_surrogate;

/// 文字カテゴリの定義
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterClass {
    class_id: u32,
    class_name: String,
    is_always_invoke: bool,
    is_grouping: bool,
    max_length: u32,
}

impl CharacterClass {
    /// 新しいカテゴリを作成します。
    ///
    /// カテゴリIDは[`InvokeDefinitionMap`]に登録された順序で割り当てられます。
    ///
    /// # 引数
    ///
    /// * `class_name` - カテゴリ名
    /// * `is_always_invoke` - 既知語があっても未知語処理を行うかどうか
    /// * `is_grouping` - 同じカテゴリの文字をまとめるかどうか
    /// * `max_length` - 宣言された最大長
    pub fn new<S>(class_name: S, is_always_invoke: bool, is_grouping: bool, max_length: u32) -> Self
    where
        S: Into<String>,
    {
        Self {
            class_id: 0,
            class_name: class_name.into(),
            is_always_invoke,
            is_grouping,
            max_length,
        }
    }

    /// カテゴリIDを返します。
    #[inline(always)]
    pub const fn class_id(&self) -> u32 {
        self.class_id
    }

    /// カテゴリ名を返します。
    #[inline(always)]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// 常に未知語処理を起動するかどうかを返します。
    #[inline(always)]
    pub const fn is_always_invoke(&self) -> bool {
        self.is_always_invoke
    }

    /// 同じカテゴリの連続する文字をまとめるかどうかを返します。
    #[inline(always)]
    pub const fn is_grouping(&self) -> bool {
        self.is_grouping
    }

    /// 宣言された最大長を返します。
    #[inline(always)]
    pub const fn max_length(&self) -> u32 {
        self.max_length
    }
}

/// カテゴリ名とカテゴリIDの対応表
#[derive(Clone, Debug, Default)]
pub struct InvokeDefinitionMap {
    classes: Vec<CharacterClass>,
    lookup_table: HashMap<String, u32>,
}

impl InvokeDefinitionMap {
    /// カテゴリの列から対応表を作成します。
    ///
    /// 各カテゴリのIDは列内の位置になります。
    /// 同じ名前が複数ある場合、名前による検索は最後のものを返します。
    pub fn new(classes: Vec<CharacterClass>) -> Self {
        let mut lookup_table = HashMap::with_capacity(classes.len());
        let classes: Vec<_> = classes
            .into_iter()
            .enumerate()
            .map(|(i, mut class)| {
                // Ids never exceed the number of classes read from a buffer.
                class.class_id = i as u32;
                lookup_table.insert(class.class_name.clone(), class.class_id);
                class
            })
            .collect();
        Self {
            classes,
            lookup_table,
        }
    }

    /// `unk_invoke.dat`形式のバイト列から対応表を読み込みます。
    ///
    /// 各レコードは、1バイトの常時起動フラグ、1バイトのグループ化フラグ、
    /// `u32`の最大長、NUL終端のカテゴリ名で構成されます。
    /// 残りが2バイト未満になるまでレコードを読み込みます。
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut buf = ByteBuffer::from(bytes.to_vec());
        let mut classes = vec![];
        while buf.position() + 1 < buf.size() {
            let is_always_invoke = buf.get() != 0;
            let is_grouping = buf.get() != 0;
            let max_length = buf.get_int();
            let class_name = String::from_utf16_lossy(&buf.get_string());
            classes.push(CharacterClass::new(
                class_name,
                is_always_invoke,
                is_grouping,
                max_length,
            ));
        }
        Self::new(classes)
    }

    /// `unk_invoke.dat`形式のバイト列を出力します。
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = ByteBuffer::with_size(self.classes.len() * 16);
        for class in &self.classes {
            buf.put(u8::from(class.is_always_invoke));
            buf.put(u8::from(class.is_grouping));
            buf.put_int(class.max_length);
            buf.put_str(&class.class_name);
        }
        buf.into_bytes()
    }

    /// カテゴリ名からカテゴリIDを検索します。
    #[inline(always)]
    pub fn lookup(&self, class_name: &str) -> Option<u32> {
        self.lookup_table.get(class_name).copied()
    }

    /// カテゴリIDからカテゴリを取得します。
    #[inline(always)]
    pub fn character_class(&self, class_id: u32) -> Option<&CharacterClass> {
        self.classes.get(usize::try_from(class_id).ok()?)
    }

    /// 登録されているカテゴリの数を返します。
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// カテゴリが1つも登録されていないかどうかを返します。
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// コード範囲からカテゴリへの対応
#[derive(Clone, Debug)]
pub struct CategoryMapping {
    start: u16,
    end: u16,
    default: String,
    compatible: Vec<String>,
}

impl CategoryMapping {
    /// 単一のコードユニットに対する対応を作成します。
    pub fn single<S>(code: u16, default: S) -> Self
    where
        S: Into<String>,
    {
        Self::range(code, code, default)
    }

    /// `start..=end`のコードユニットに対する対応を作成します。
    pub fn range<S>(start: u16, end: u16, default: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            start,
            end,
            default: default.into(),
            compatible: vec![],
        }
    }

    /// 互換カテゴリを設定します。
    pub fn with_compatible<I, S>(mut self, compatible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compatible = compatible.into_iter().map(Into::into).collect();
        self
    }
}

/// 文字からカテゴリへの対応表
///
/// UTF-16コードユニットごとに、主カテゴリのIDと互換カテゴリのビット集合を保持します。
pub struct CharacterDefinition {
    category_map: Vec<u8>,
    compatible_map: Vec<u32>,
    invoke_definition_map: InvokeDefinitionMap,
}

impl CharacterDefinition {
    /// 3つのバイナリ表から対応表を読み込みます。
    ///
    /// # 引数
    ///
    /// * `category_map` - `unk_char.dat`の内容
    /// * `compatible_map` - `unk_compat.dat`の内容
    /// * `invoke_def` - `unk_invoke.dat`の内容
    ///
    /// # エラー
    ///
    /// `compatible_map`の長さが4の倍数でない場合、[`MecabError`]が返されます。
    pub fn load(category_map: Vec<u8>, compatible_map: &[u8], invoke_def: &[u8]) -> Result<Self> {
        if compatible_map.len() % 4 != 0 {
            return Err(MecabError::invalid_format(
                "unk_compat.dat",
                "the byte length must be a multiple of 4",
            ));
        }
        let compatible_map = compatible_map
            .chunks_exact(4)
            .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        Ok(Self {
            category_map,
            compatible_map,
            invoke_definition_map: InvokeDefinitionMap::from_bytes(invoke_def),
        })
    }

    /// カテゴリ定義とコード範囲の対応から表を構築します。
    ///
    /// どの対応にも含まれないコードユニットには`DEFAULT`カテゴリが割り当てられます。
    /// 未登録のカテゴリ名を参照する対応は無視されます。
    ///
    /// # エラー
    ///
    /// `DEFAULT`カテゴリが定義されていない場合、[`MecabError`]が返されます。
    pub fn from_mappings(
        invoke_definition_map: InvokeDefinitionMap,
        mappings: &[CategoryMapping],
    ) -> Result<Self> {
        let default_id = invoke_definition_map.lookup(DEFAULT_CATEGORY).ok_or_else(|| {
            MecabError::invalid_argument("invoke_definition_map", "DEFAULT category is undefined")
        })?;
        let default_id = u8::try_from(default_id)?;

        let mut category_map: Vec<Option<u8>> = vec![None; NUM_UTF16_UNITS];
        let mut compatible_map = vec![0u32; NUM_UTF16_UNITS];

        for mapping in mappings {
            let class_id = invoke_definition_map
                .lookup(&mapping.default)
                .and_then(|id| u8::try_from(id).ok());
            let compat_bits = mapping
                .compatible
                .iter()
                .filter_map(|name| invoke_definition_map.lookup(name))
                .filter(|&id| id < 32)
                .fold(0u32, |bits, id| bits | (1 << id));

            for code in usize::from(mapping.start)..=usize::from(mapping.end) {
                if class_id.is_some() {
                    category_map[code] = class_id;
                }
                compatible_map[code] |= compat_bits;
            }
        }

        Ok(Self {
            category_map: category_map
                .into_iter()
                .map(|id| id.unwrap_or(default_id))
                .collect(),
            compatible_map,
            invoke_definition_map,
        })
    }

    /// カテゴリ定義の対応表を返します。
    #[inline(always)]
    pub fn invoke_definition_map(&self) -> &InvokeDefinitionMap {
        &self.invoke_definition_map
    }

    fn default_class(&self) -> Option<&CharacterClass> {
        self.invoke_definition_map
            .lookup(DEFAULT_CATEGORY)
            .and_then(|id| self.invoke_definition_map.character_class(id))
    }

    /// 文字の主カテゴリを返します。
    ///
    /// サロゲートペアの文字と、表の範囲外の文字は`DEFAULT`カテゴリになります。
    ///
    /// # 引数
    ///
    /// * `ch` - 1文字分のUTF-16コードユニット
    pub fn lookup(&self, ch: &[u16]) -> Option<&CharacterClass> {
        let Some(&unit) = ch.first() else {
            return self.default_class();
        };
        if is_high_surrogate(unit) {
            return self.default_class();
        }
        self.category_map
            .get(usize::from(unit))
            .and_then(|&id| self.invoke_definition_map.character_class(u32::from(id)))
            .or_else(|| self.default_class())
    }

    /// 文字の互換カテゴリを返します。主カテゴリは含みません。
    pub fn lookup_compatible(&self, ch: &[u16]) -> Vec<&CharacterClass> {
        let Some(&unit) = ch.first() else {
            return vec![];
        };
        let bits = self
            .compatible_map
            .get(usize::from(unit))
            .copied()
            .unwrap_or(0);
        if bits == 0 {
            return vec![];
        }
        let primary = self.lookup(ch).map(CharacterClass::class_id);
        (0..32)
            .filter(|&bit| bits & (1 << bit) != 0 && Some(bit) != primary)
            .filter_map(|bit| self.invoke_definition_map.character_class(bit))
            .collect()
    }

    /// `unk_char.dat`形式のバイト列を返します。
    #[inline(always)]
    pub fn category_map_bytes(&self) -> &[u8] {
        &self.category_map
    }

    /// `unk_compat.dat`形式のバイト列を出力します。
    pub fn compatible_map_bytes(&self) -> Vec<u8> {
        let mut buf = ByteBuffer::with_size(self.compatible_map.len() * 4);
        for &bits in &self.compatible_map {
            buf.put_int(bits);
        }
        buf.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes() -> InvokeDefinitionMap {
        InvokeDefinitionMap::new(vec![
            CharacterClass::new("DEFAULT", false, true, 0),
            CharacterClass::new("HANGUL", false, true, 2),
            CharacterClass::new("ALPHA", true, true, 0),
            CharacterClass::new("NUMERIC", true, true, 0),
        ])
    }

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    #[test]
    fn test_invoke_definition_bytes() {
        let map = classes();
        let bytes = map.to_bytes();
        assert_eq!(&bytes[..6], &[0, 1, 0, 0, 0, 0]);
        assert_eq!(&bytes[6..14], b"DEFAULT\0");

        let map = InvokeDefinitionMap::from_bytes(&bytes);
        assert_eq!(map.len(), 4);
        assert_eq!(map.lookup("HANGUL"), Some(1));
        assert_eq!(map.lookup("KANJI"), None);
        let alpha = map.character_class(2).unwrap();
        assert_eq!(alpha.class_name(), "ALPHA");
        assert!(alpha.is_always_invoke());
        assert!(alpha.is_grouping());
        assert_eq!(map.character_class(1).unwrap().max_length(), 2);
        assert!(map.character_class(4).is_none());
    }

    #[test]
    fn test_invoke_definition_trailing_byte() {
        let mut bytes = classes().to_bytes();
        bytes.push(1);
        assert_eq!(InvokeDefinitionMap::from_bytes(&bytes).len(), 4);
    }

    #[test]
    fn test_lookup() {
        let mappings = vec![
            CategoryMapping::range(0xac00, 0xd7a3, "HANGUL"),
            CategoryMapping::range(0x0041, 0x005a, "ALPHA"),
            CategoryMapping::range(0x0030, 0x0039, "NUMERIC").with_compatible(["ALPHA"]),
        ];
        let def = CharacterDefinition::from_mappings(classes(), &mappings).unwrap();
        assert_eq!(def.lookup(&units("가")).unwrap().class_name(), "HANGUL");
        assert_eq!(def.lookup(&units("Z")).unwrap().class_name(), "ALPHA");
        assert_eq!(def.lookup(&units("!")).unwrap().class_name(), "DEFAULT");
        assert_eq!(def.lookup(&units("😀")).unwrap().class_name(), "DEFAULT");

        let compat = def.lookup_compatible(&units("7"));
        assert_eq!(compat.len(), 1);
        assert_eq!(compat[0].class_name(), "ALPHA");
        assert!(def.lookup_compatible(&units("가")).is_empty());
    }

    #[test]
    fn test_compatible_excludes_primary() {
        let mappings =
            vec![CategoryMapping::single(0x0031, "NUMERIC").with_compatible(["NUMERIC", "ALPHA"])];
        let def = CharacterDefinition::from_mappings(classes(), &mappings).unwrap();
        let compat = def.lookup_compatible(&units("1"));
        assert_eq!(compat.len(), 1);
        assert_eq!(compat[0].class_name(), "ALPHA");
    }

    #[test]
    fn test_load() {
        let mappings = vec![CategoryMapping::range(0xac00, 0xd7a3, "HANGUL")];
        let def = CharacterDefinition::from_mappings(classes(), &mappings).unwrap();
        let loaded = CharacterDefinition::load(
            def.category_map_bytes().to_vec(),
            &def.compatible_map_bytes(),
            &def.invoke_definition_map().to_bytes(),
        )
        .unwrap();
        assert_eq!(loaded.lookup(&units("힣")).unwrap().class_name(), "HANGUL");
        assert_eq!(loaded.lookup(&units("a")).unwrap().class_name(), "DEFAULT");
    }

    #[test]
    fn test_short_tables() {
        let invoke = classes().to_bytes();
        let def = CharacterDefinition::load(vec![1; 16], &[0; 8], &invoke).unwrap();
        assert_eq!(def.lookup(&[0x0005]).unwrap().class_name(), "HANGUL");
        assert_eq!(def.lookup(&[0x0041]).unwrap().class_name(), "DEFAULT");
        assert!(def.lookup_compatible(&[0x0041]).is_empty());
        assert!(CharacterDefinition::load(vec![], &[0; 3], &invoke).is_err());
    }

    #[test]
    fn test_unresolved_id() {
        let invoke = classes().to_bytes();
        let def = CharacterDefinition::load(vec![9; 4], &[], &invoke).unwrap();
        assert_eq!(def.lookup(&[0x0001]).unwrap().class_name(), "DEFAULT");
    }

    #[test]
    fn test_missing_default() {
        let map = InvokeDefinitionMap::new(vec![CharacterClass::new("HANGUL", false, true, 0)]);
        assert!(CharacterDefinition::from_mappings(map, &[]).is_err());
    }
}
