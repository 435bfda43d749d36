//! 辞書リソースの設定
//!
//! このモジュールは、辞書を構成するバイナリファイルの論理名を定義します。

/// 辞書を構成するリソースの論理名
///
/// 各名前は[`ResourceLoader`](crate::dictionary::loader::ResourceLoader)に渡されます。
/// 読み込み時には、まず`<名前>.gz`が試され、見つからなければ`<名前>`が使われます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryFiles {
    /// 既知語レコード
    pub tid: String,
    /// 既知語の文字列表
    pub tid_pos: String,
    /// トライIDから既知語レコードへの対応表
    pub tid_map: String,
    /// 接続コスト行列
    pub cc: String,
    /// 未知語レコード
    pub unk: String,
    /// 未知語の文字列表
    pub unk_pos: String,
    /// カテゴリIDから未知語レコードへの対応表
    pub unk_map: String,
    /// UTF-16コードユニットごとの主カテゴリ
    pub unk_char: String,
    /// UTF-16コードユニットごとの互換カテゴリ
    pub unk_compat: String,
    /// カテゴリ定義
    pub unk_invoke: String,
}

impl Default for DictionaryFiles {
    fn default() -> Self {
        Self {
            tid: "tid.dat".to_string(),
            tid_pos: "tid_pos.dat".to_string(),
            tid_map: "tid_map.dat".to_string(),
            cc: "cc.dat".to_string(),
            unk: "unk.dat".to_string(),
            unk_pos: "unk_pos.dat".to_string(),
            unk_map: "unk_map.dat".to_string(),
            unk_char: "unk_char.dat".to_string(),
            unk_compat: "unk_compat.dat".to_string(),
            unk_invoke: "unk_invoke.dat".to_string(),
        }
    }
}

impl DictionaryFiles {
    /// すべての論理名を返します。
    pub fn names(&self) -> [&str; 10] {
        [
            self.tid.as_str(),
            self.tid_pos.as_str(),
            self.tid_map.as_str(),
            self.cc.as_str(),
            self.unk.as_str(),
            self.unk_pos.as_str(),
            self.unk_map.as_str(),
            self.unk_char.as_str(),
            self.unk_compat.as_str(),
            self.unk_invoke.as_str(),
        ]
    }
}
