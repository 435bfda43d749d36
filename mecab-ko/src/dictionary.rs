//! トークン化のための辞書モジュール。
//!
//! このモジュールは、形態素解析に必要な辞書データの読み込み、構築、管理を行います。
//! 主な機能として以下を提供します:
//!
//! - 10個のバイナリリソースからの辞書の読み込み
//! - gzip圧縮されたリソースの透過的な展開
//! - 既知語の共通接頭辞検索と未知語の生成
//!
//! # 辞書の読み込み方法
//!
//! 辞書は[`ResourceLoader`]を介して読み込まれます。
//!
//! - [`Dictionary::load`]: 任意のローダーと共通接頭辞検索の実装から辞書を読み込む
//! - [`Dictionary::from_loader`]: 任意のローダーから辞書を読み込み、トライを再構築する
//! - [`Dictionary::from_dir`]: ディレクトリから辞書を読み込み、トライを再構築する
//!
//! # 辞書のビルド
//!
//! [`SystemDictionaryBuilder`]を使用して、単語と接続コストから辞書を構築できます。
pub mod builder;
pub mod character;
pub mod config;
pub(crate) mod connector;
pub mod lexicon;
pub mod loader;
pub mod trie;
pub mod unknown;
pub(crate) mod word_idx;

use std::path::Path;

use crate::dictionary::character::CharacterDefinition;
use crate::dictionary::lexicon::{Lexicon, WordParam, WordTable};
use crate::dictionary::loader::{fetch, DirectoryLoader};
use crate::dictionary::trie::{PrefixSearch, Trie};
use crate::dictionary::unknown::UnkHandler;
use crate::errors::Result;

pub use crate::dictionary::builder::SystemDictionaryBuilder;
pub use crate::dictionary::config::DictionaryFiles;
pub use crate::dictionary::connector::{ConnectorCost, ConnectorView, MatrixConnector};
pub use crate::dictionary::loader::{MemoryLoader, ResourceLoader};
pub use crate::dictionary::word_idx::WordIdx;

/// 語彙の種類。
#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, Default)]
#[repr(u8)]
pub enum LexType {
    /// 既知語。
    ///
    /// 辞書のトライに登録された単語です。
    #[default]
    Known,
    /// 未知語。
    ///
    /// 文字カテゴリから生成された単語です。
    Unknown,
}

/// 辞書
///
/// 共通接頭辞検索、既知語表、接続コスト行列、未知語ハンドラーを保持します。
/// 読み込み後は変更されないため、複数のスレッドから共有できます。
pub struct Dictionary {
    trie: Box<dyn PrefixSearch>,
    lexicon: Lexicon,
    connector: MatrixConnector,
    unk_handler: UnkHandler,
}

impl Dictionary {
    /// 構成要素から辞書を作成します。
    pub fn new(
        trie: Box<dyn PrefixSearch>,
        lexicon: Lexicon,
        connector: MatrixConnector,
        unk_handler: UnkHandler,
    ) -> Self {
        Self {
            trie,
            lexicon,
            connector,
            unk_handler,
        }
    }

    /// ローダーから辞書のリソースを読み込みます。
    ///
    /// 各リソースは`<名前>.gz`、`<名前>`の順に探されます。
    ///
    /// # 引数
    ///
    /// * `loader` - リソースのローダー
    /// * `trie` - 既知語の共通接頭辞検索の実装
    /// * `files` - リソースの論理名
    ///
    /// # エラー
    ///
    /// リソースが見つからない場合や、形式が不正な場合、[`MecabError`](crate::errors::MecabError)が返されます。
    pub fn load<L>(loader: &L, trie: Box<dyn PrefixSearch>, files: &DictionaryFiles) -> Result<Self>
    where
        L: ResourceLoader + ?Sized,
    {
        let lexicon = Self::fetch_lexicon(loader, files)?;
        Self::load_with_lexicon(loader, trie, lexicon, files)
    }

    /// ローダーから辞書のリソースを読み込み、トライを既知語の文字列表から再構築します。
    ///
    /// 既知語の3つのリソースは一度だけ読み込まれます。
    ///
    /// # エラー
    ///
    /// リソースが見つからない場合や、形式が不正な場合、[`MecabError`](crate::errors::MecabError)が返されます。
    pub fn from_loader<L>(loader: &L, files: &DictionaryFiles) -> Result<Self>
    where
        L: ResourceLoader + ?Sized,
    {
        let lexicon = Self::fetch_lexicon(loader, files)?;
        let trie = Trie::from_word_table(lexicon.table())?;
        Self::load_with_lexicon(loader, Box::new(trie), lexicon, files)
    }

    fn fetch_lexicon<L>(loader: &L, files: &DictionaryFiles) -> Result<Lexicon>
    where
        L: ResourceLoader + ?Sized,
    {
        Ok(Lexicon::load(
            fetch(loader, &files.tid)?,
            fetch(loader, &files.tid_pos)?,
            &fetch(loader, &files.tid_map)?,
        ))
    }

    fn load_with_lexicon<L>(
        loader: &L,
        trie: Box<dyn PrefixSearch>,
        lexicon: Lexicon,
        files: &DictionaryFiles,
    ) -> Result<Self>
    where
        L: ResourceLoader + ?Sized,
    {
        let connector = MatrixConnector::from_bytes(&fetch(loader, &files.cc)?)?;
        let char_def = CharacterDefinition::load(
            fetch(loader, &files.unk_char)?,
            &fetch(loader, &files.unk_compat)?,
            &fetch(loader, &files.unk_invoke)?,
        )?;
        let unk_table = WordTable::load(
            fetch(loader, &files.unk)?,
            fetch(loader, &files.unk_pos)?,
            &fetch(loader, &files.unk_map)?,
        );
        let unk_handler = UnkHandler::new(unk_table, char_def);

        log::debug!(
            "Dictionary loaded: {} known records, {} unknown records, {}x{} connection matrix, {} character classes",
            lexicon.table().num_records(),
            unk_handler.table().num_records(),
            connector.num_right(),
            connector.num_left(),
            unk_handler.char_def().invoke_definition_map().len(),
        );
        if !lexicon.verify(&connector) || !unk_handler.verify(&connector) {
            log::warn!("The dictionary includes connection ids out of the matrix range");
        }

        Ok(Self::new(trie, lexicon, connector, unk_handler))
    }

    /// ディレクトリから既定の論理名で辞書を読み込みます。
    ///
    /// トライは既知語の文字列表から再構築されます。
    ///
    /// # エラー
    ///
    /// リソースが見つからない場合や、形式が不正な場合、[`MecabError`](crate::errors::MecabError)が返されます。
    pub fn from_dir<P>(dir: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::from_loader(&DirectoryLoader::new(dir), &DictionaryFiles::default())
    }

    /// 共通接頭辞検索の実装を返します。
    #[inline(always)]
    pub fn trie(&self) -> &dyn PrefixSearch {
        self.trie.as_ref()
    }

    /// 既知語表を返します。
    #[inline(always)]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// 接続コスト行列を返します。
    #[inline(always)]
    pub fn connector(&self) -> &MatrixConnector {
        &self.connector
    }

    /// 未知語ハンドラーを返します。
    #[inline(always)]
    pub fn unk_handler(&self) -> &UnkHandler {
        &self.unk_handler
    }

    /// 文字カテゴリ表を返します。
    #[inline(always)]
    pub fn char_def(&self) -> &CharacterDefinition {
        self.unk_handler.char_def()
    }

    /// 単語の素性を取得します。
    ///
    /// 文字列表に格納された`"表層形,素性..."`の文字列をそのまま返します。
    #[inline(always)]
    pub fn word_feature(&self, word_idx: WordIdx) -> String {
        match word_idx.lex_type {
            LexType::Known => self.lexicon.word_feature(word_idx),
            LexType::Unknown => self.unk_handler.word_feature(word_idx),
        }
    }

    /// 単語のパラメータを取得します。
    #[inline(always)]
    pub fn word_param(&self, word_idx: WordIdx) -> WordParam {
        match word_idx.lex_type {
            LexType::Known => self.lexicon.word_param(word_idx),
            LexType::Unknown => self.unk_handler.word_param(word_idx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::character::{CharacterClass, InvokeDefinitionMap};
    use crate::errors::MecabError;

    use std::cell::RefCell;

    use hashbrown::HashMap;

    fn builder() -> SystemDictionaryBuilder {
        let classes = InvokeDefinitionMap::new(vec![CharacterClass::new("DEFAULT", false, true, 0)]);
        let char_def = CharacterDefinition::from_mappings(classes, &[]).unwrap();
        let mut builder = SystemDictionaryBuilder::new(MatrixConnector::new(3, 3).unwrap(), char_def);
        builder.add_word("가", 1, 2, 100, "NNG,*").unwrap();
        builder.add_word("나", 2, 1, 200, "NP,*").unwrap();
        builder.add_unknown("DEFAULT", 1, 1, 1000, "SY,*").unwrap();
        builder
    }

    #[test]
    fn test_word_feature() {
        let dict = builder().build().unwrap();
        assert_eq!(dict.word_feature(WordIdx::new(LexType::Known, 10)), "나,NP,*");
        assert_eq!(
            dict.word_feature(WordIdx::new(LexType::Unknown, 0)),
            "DEFAULT,SY,*"
        );
        assert_eq!(
            dict.word_param(WordIdx::new(LexType::Known, 0)),
            WordParam::new(1, 2, 100)
        );
    }

    #[test]
    fn test_load_missing_resource() {
        let mut resources = builder().to_resources().unwrap();
        resources.remove("unk_invoke.dat");
        let loader = MemoryLoader::from(resources);
        let trie = Trie::from_records([("가", 0)]).unwrap();
        let result = Dictionary::load(&loader, Box::new(trie), &DictionaryFiles::default());
        assert!(matches!(
            result,
            Err(MecabError::ResourceNotFound(name)) if name == "unk_invoke.dat"
        ));
    }

    struct CountingLoader {
        inner: MemoryLoader,
        counts: RefCell<HashMap<String, usize>>,
    }

    impl ResourceLoader for CountingLoader {
        fn load(&self, name: &str) -> Result<Option<Vec<u8>>> {
            *self.counts.borrow_mut().entry(name.to_string()).or_default() += 1;
            self.inner.load(name)
        }
    }

    #[test]
    fn test_from_loader_fetches_each_resource_once() {
        let loader = CountingLoader {
            inner: MemoryLoader::from(builder().to_resources().unwrap()),
            counts: RefCell::new(HashMap::new()),
        };
        let dict = Dictionary::from_loader(&loader, &DictionaryFiles::default()).unwrap();
        assert_eq!(dict.lexicon().table().num_records(), 2);

        let counts = loader.counts.borrow();
        assert_eq!(counts.len(), 20);
        for name in ["tid.dat", "tid_pos.dat", "tid_map.dat", "cc.dat", "unk_invoke.dat"] {
            assert_eq!(counts[name], 1, "{name}");
            assert_eq!(counts[format!("{name}.gz").as_str()], 1, "{name}.gz");
        }
    }

    #[test]
    fn test_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        for (name, bytes) in builder().to_resources().unwrap() {
            std::fs::write(dir.path().join(name), bytes).unwrap();
        }
        let dict = Dictionary::from_dir(dir.path()).unwrap();
        let input: Vec<char> = "나가".chars().collect();
        let matches = dict.trie().common_prefix_search(&input);
        assert_eq!(matches.len(), 1);
        assert_eq!(dict.lexicon().table().ids(matches[0].value), &[10]);
    }
}
