//! mecab-koのテストモジュール群
//!
//! 各コンポーネント(connector、loading、tokenizer)の
//! 動作を検証するテストを含みます。


use crate::dictionary::character::{
    CategoryMapping, CharacterClass, CharacterDefinition, InvokeDefinitionMap,
};
use crate::dictionary::{MatrixConnector, SystemDictionaryBuilder};

/// 接続ID 0をBOS/EOS、1を既知語、2を未知語に用いる小さな辞書を構築します。
///
/// 既知語は`가`(コスト100)と`나`(コスト50)の2語です。
pub(crate) fn scenario_builder() -> SystemDictionaryBuilder {
    let classes = InvokeDefinitionMap::new(vec![
        CharacterClass::new("DEFAULT", false, true, 0),
        CharacterClass::new("SPACE", false, true, 0),
        CharacterClass::new("HANGUL", false, true, 2),
        CharacterClass::new("SYMBOL", true, true, 0),
    ]);
    let char_def = CharacterDefinition::from_mappings(
        classes,
        &[
            CategoryMapping::single(0x0020, "SPACE"),
            CategoryMapping::range(0xac00, 0xd7a3, "HANGUL"),
            CategoryMapping::range(0x0021, 0x002f, "SYMBOL"),
        ],
    )
    .unwrap();

    let mut conn = MatrixConnector::new(3, 3).unwrap();
    conn.put(0, 1, 5).unwrap();
    conn.put(1, 1, 10).unwrap();
    conn.put(0, 2, 30).unwrap();
    conn.put(1, 2, 40).unwrap();
    conn.put(2, 1, 40).unwrap();
    conn.put(2, 2, 60).unwrap();

    let mut builder = SystemDictionaryBuilder::new(conn, char_def);
    builder.add_word("가", 1, 1, 100, "NNG,*,F,가,*,*,*,*").unwrap();
    builder.add_word("나", 1, 1, 50, "NP,*,F,나,*,*,*,*").unwrap();
    builder.add_unknown("DEFAULT", 2, 2, 2000, "SL,*,*,*,*,*,*,*").unwrap();
    builder.add_unknown("SPACE", 2, 2, 500, "SP,*,*,*,*,*,*,*").unwrap();
    builder.add_unknown("HANGUL", 2, 2, 3000, "UNKNOWN,*,*,*,*,*,*,*").unwrap();
    builder.add_unknown("SYMBOL", 2, 2, 1500, "SY,*,*,*,*,*,*,*").unwrap();
    builder
}
