//! 合成辞書を用いた形態素解析のベンチマーク
//!
//! ハングル音節の組み合わせから既知語を生成し、デフォルト設定と
//! グルーピング長を制限した設定での形態素解析速度を計測します。

use std::sync::Arc;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mecab_ko::dictionary::character::{
    CategoryMapping, CharacterClass, CharacterDefinition, InvokeDefinitionMap,
};
use mecab_ko::dictionary::MatrixConnector;
use mecab_ko::{Dictionary, SystemDictionaryBuilder, Tokenizer};

const SYLLABLES: &[char] = &['가', '나', '다', '라', '마', '바', '사', '아', '자', '하'];
const NUM_IDS: u16 = 8;

fn build_dictionary() -> Dictionary {
    let classes = InvokeDefinitionMap::new(vec![
        CharacterClass::new("DEFAULT", false, true, 0),
        CharacterClass::new("SPACE", false, true, 0),
        CharacterClass::new("HANGUL", false, true, 2),
        CharacterClass::new("SYMBOL", true, false, 0),
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

    let mut conn = MatrixConnector::new(usize::from(NUM_IDS), usize::from(NUM_IDS)).unwrap();
    for r in 0..NUM_IDS {
        for l in 0..NUM_IDS {
            conn.put(r, l, ((r * 31 + l * 17) % 200) as i16 - 100).unwrap();
        }
    }

    let mut builder = SystemDictionaryBuilder::new(conn, char_def);
    for (i, a) in SYLLABLES.iter().enumerate() {
        let id = (i as u16 % (NUM_IDS - 1)) + 1;
        builder.add_word(&a.to_string(), id, id, 500, "NNG,*,F,*,*,*,*,*").unwrap();
        for (j, b) in SYLLABLES.iter().enumerate() {
            let id = ((i + j) as u16 % (NUM_IDS - 1)) + 1;
            let surface = format!("{a}{b}");
            builder.add_word(&surface, id, id, 200, "NNP,*,F,*,*,*,*,*").unwrap();
        }
    }
    builder.add_unknown("DEFAULT", 1, 1, 3000, "SL,*,*,*,*,*,*,*").unwrap();
    builder.add_unknown("SPACE", 2, 2, 100, "SP,*,*,*,*,*,*,*").unwrap();
    builder.add_unknown("HANGUL", 3, 3, 4000, "UNKNOWN,*,*,*,*,*,*,*").unwrap();
    builder.add_unknown("SYMBOL", 4, 4, 1000, "SY,*,*,*,*,*,*,*").unwrap();
    builder.build().unwrap()
}

fn build_corpus() -> Vec<String> {
    (0..500)
        .map(|n| {
            let mut line = String::new();
            for k in 0..40 {
                line.push(SYLLABLES[(n * 7 + k * 3) % SYLLABLES.len()]);
                if k % 5 == 4 {
                    line.push(if k % 15 == 14 { '.' } else { ' ' });
                }
            }
            line.push_str("한국어!");
            line
        })
        .collect()
}

fn bench_tokenization(c: &mut Criterion) {
    let dict = Arc::new(build_dictionary());
    let lines = build_corpus();
    let total_bytes: usize = lines.iter().map(String::len).sum();

    let mut group = c.benchmark_group("Tokenization Speed (synthetic)");
    group.throughput(Throughput::Bytes(total_bytes as u64));
    group.warm_up_time(Duration::from_secs(3));
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    group.bench_function(BenchmarkId::new("Default", "Worker"), |b| {
        b.iter_with_setup(
            || Tokenizer::from_shared_dictionary(dict.clone()).new_worker(),
            |mut worker| {
                for line in &lines {
                    worker.reset_sentence(line);
                    worker.tokenize().unwrap();
                }
            },
        );
    });

    group.bench_function(BenchmarkId::new("Grouping-24", "Worker"), |b| {
        b.iter_with_setup(
            || {
                Tokenizer::from_shared_dictionary(dict.clone())
                    .max_grouping_len(24)
                    .new_worker()
            },
            |mut worker| {
                for line in &lines {
                    worker.reset_sentence(line);
                    worker.tokenize().unwrap();
                }
            },
        );
    });

    group.bench_function(BenchmarkId::new("Default", "Tokenize"), |b| {
        let tokenizer = Tokenizer::from_shared_dictionary(dict.clone());
        b.iter(|| {
            for line in &lines {
                tokenizer.tokenize(line).unwrap();
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_tokenization);
criterion_main!(benches);
