//! 辞書構築のためのビルダー
//!
//! このモジュールは、単語と接続コストから辞書のバイナリ表を書き出し、
//! [`Dictionary`]を構築するためのビルダーを提供します。

use std::collections::BTreeMap;

use hashbrown::HashMap;

use crate::byte_buffer::ByteBuffer;
use crate::common::WORD_RECORD_LEN;
use crate::dictionary::character::CharacterDefinition;
use crate::dictionary::config::DictionaryFiles;
use crate::dictionary::connector::MatrixConnector;
use crate::dictionary::loader::MemoryLoader;
use crate::dictionary::trie::Trie;
use crate::dictionary::Dictionary;
use crate::errors::{MecabError, Result};

/// 単語レコード、文字列表、ID対応表を書き出すビルダー
///
/// 既知語表と未知語表の両方で使われます。
#[derive(Default)]
pub struct WordTableBuilder {
    records: ByteBuffer,
    strings: ByteBuffer,
    id_map: BTreeMap<u32, Vec<u32>>,
}

impl WordTableBuilder {
    /// 空のビルダーを作成します。
    pub fn new() -> Self {
        Self {
            records: ByteBuffer::with_size(WORD_RECORD_LEN),
            strings: ByteBuffer::with_size(16),
            id_map: BTreeMap::new(),
        }
    }

    /// レコードを追加します。
    ///
    /// # 引数
    ///
    /// * `key` - ID対応表のキー（トライIDまたはカテゴリID）
    /// * `left_id` - 左文脈ID
    /// * `right_id` - 右文脈ID
    /// * `word_cost` - 単語コスト
    /// * `feature` - 文字列表に書き込む文字列
    ///
    /// # 戻り値
    ///
    /// 追加したレコードのバイトオフセット
    ///
    /// # エラー
    ///
    /// オフセットが32ビットに収まらない場合、[`MecabError`]が返されます。
    pub fn push(
        &mut self,
        key: u32,
        left_id: u16,
        right_id: u16,
        word_cost: i16,
        feature: &str,
    ) -> Result<u32> {
        let record_id = u32::try_from(self.records.position())?;
        let string_offset = u32::try_from(self.strings.position())?;

        self.records.put_short(i32::from(left_id))?;
        self.records.put_short(i32::from(right_id))?;
        self.records.put_short(i32::from(word_cost))?;
        self.records.put_int(string_offset);
        self.strings.put_str(feature);

        self.id_map.entry(key).or_default().push(record_id);
        Ok(record_id)
    }

    /// 追加されたレコードの数を返します。
    pub fn len(&self) -> usize {
        self.records.position() / WORD_RECORD_LEN
    }

    /// レコードが1つも追加されていない場合に`true`を返します。
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 3つのバイナリ表を書き出します。
    ///
    /// # 戻り値
    ///
    /// 単語レコード、文字列表、ID対応表の組。ID対応表のキーは昇順に並びます。
    pub fn build(&self) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
        let mut id_map = ByteBuffer::with_size(4);
        id_map.put_int(self.id_map.len() as u32);
        for (&key, ids) in &self.id_map {
            id_map.put_int(key);
            id_map.put_int(ids.len() as u32);
            for &id in ids {
                id_map.put_int(id);
            }
        }
        (
            self.records.clone().into_bytes(),
            self.strings.clone().into_bytes(),
            id_map.into_bytes(),
        )
    }
}

/// 単語と接続コストからシステム辞書を構築するビルダー
///
/// # 例
///
/// ```
/// use mecab_ko::dictionary::character::{CharacterClass, CharacterDefinition, InvokeDefinitionMap};
/// use mecab_ko::dictionary::{MatrixConnector, SystemDictionaryBuilder};
///
/// let classes = InvokeDefinitionMap::new(vec![CharacterClass::new("DEFAULT", false, true, 0)]);
/// let char_def = CharacterDefinition::from_mappings(classes, &[]).unwrap();
///
/// let mut builder = SystemDictionaryBuilder::new(MatrixConnector::new(2, 2).unwrap(), char_def);
/// builder.add_word("가", 1, 1, 100, "NNG,*").unwrap();
/// builder.add_unknown("DEFAULT", 1, 1, 1000, "SY,*").unwrap();
/// let dict = builder.build().unwrap();
/// assert_eq!(dict.lexicon().table().num_records(), 1);
/// ```
pub struct SystemDictionaryBuilder {
    connector: MatrixConnector,
    char_def: CharacterDefinition,
    surfaces: HashMap<String, u32>,
    known: WordTableBuilder,
    unknown: WordTableBuilder,
}

impl SystemDictionaryBuilder {
    /// 新しいビルダーを作成します。
    ///
    /// # 引数
    ///
    /// * `connector` - 接続コスト行列
    /// * `char_def` - 文字カテゴリ表
    pub fn new(connector: MatrixConnector, char_def: CharacterDefinition) -> Self {
        Self {
            connector,
            char_def,
            surfaces: HashMap::new(),
            known: WordTableBuilder::new(),
            unknown: WordTableBuilder::new(),
        }
    }

    /// 既知語を追加します。
    ///
    /// 同じ表層形の単語は同じトライIDを共有し、追加した順に並びます。
    /// 文字列表には`"表層形,素性"`の形で書き込まれます。
    ///
    /// # エラー
    ///
    /// 表層形が空の場合、[`MecabError`]が返されます。
    pub fn add_word(
        &mut self,
        surface: &str,
        left_id: u16,
        right_id: u16,
        word_cost: i16,
        features: &str,
    ) -> Result<()> {
        if surface.is_empty() {
            return Err(MecabError::invalid_argument(
                "surface",
                "surface must not be empty",
            ));
        }
        let next_id = u32::try_from(self.surfaces.len())?;
        let trie_id = *self.surfaces.entry(surface.to_string()).or_insert(next_id);
        self.known.push(
            trie_id,
            left_id,
            right_id,
            word_cost,
            &format!("{surface},{features}"),
        )?;
        Ok(())
    }

    /// 文字カテゴリに対する未知語レコードを追加します。
    ///
    /// 文字列表には`"カテゴリ名,素性"`の形で書き込まれます。
    ///
    /// # エラー
    ///
    /// カテゴリが定義されていない場合、[`MecabError`]が返されます。
    pub fn add_unknown(
        &mut self,
        category: &str,
        left_id: u16,
        right_id: u16,
        word_cost: i16,
        features: &str,
    ) -> Result<()> {
        let class_id = self
            .char_def
            .invoke_definition_map()
            .lookup(category)
            .ok_or_else(|| {
                MecabError::invalid_argument("category", format!("{category} is undefined"))
            })?;
        self.unknown.push(
            class_id,
            left_id,
            right_id,
            word_cost,
            &format!("{category},{features}"),
        )?;
        Ok(())
    }

    /// 辞書の各リソースを、既定の論理名をキーとして書き出します。
    ///
    /// # エラー
    ///
    /// 接続コスト行列の寸法が16ビットに収まらない場合、[`MecabError`]が返されます。
    pub fn to_resources(&self) -> Result<HashMap<String, Vec<u8>>> {
        let files = DictionaryFiles::default();
        let (tid, tid_pos, tid_map) = self.known.build();
        let (unk, unk_pos, unk_map) = self.unknown.build();

        let mut resources = HashMap::new();
        resources.insert(files.tid, tid);
        resources.insert(files.tid_pos, tid_pos);
        resources.insert(files.tid_map, tid_map);
        resources.insert(files.cc, self.connector.to_bytes()?);
        resources.insert(files.unk, unk);
        resources.insert(files.unk_pos, unk_pos);
        resources.insert(files.unk_map, unk_map);
        resources.insert(files.unk_char, self.char_def.category_map_bytes().to_vec());
        resources.insert(files.unk_compat, self.char_def.compatible_map_bytes());
        resources.insert(
            files.unk_invoke,
            self.char_def.invoke_definition_map().to_bytes(),
        );
        Ok(resources)
    }

    /// 辞書を構築します。
    ///
    /// 書き出したリソースを読み込み直すため、ファイルから読み込んだ辞書と同じ状態になります。
    ///
    /// # エラー
    ///
    /// 接続IDが接続コスト行列の範囲外の場合、[`MecabError`]が返されます。
    pub fn build(&self) -> Result<Dictionary> {
        let trie = Trie::from_records(self.surfaces.iter().map(|(s, &id)| (s.as_str(), id)))?;
        let loader = MemoryLoader::from(self.to_resources()?);
        let dict = Dictionary::load(&loader, Box::new(trie), &DictionaryFiles::default())?;

        if !dict.lexicon().verify(dict.connector()) {
            return Err(MecabError::invalid_argument(
                "add_word",
                "words include invalid connection ids.",
            ));
        }
        if !dict.unk_handler().verify(dict.connector()) {
            return Err(MecabError::invalid_argument(
                "add_unknown",
                "unknown words include invalid connection ids.",
            ));
        }
        Ok(dict)
    }
}
