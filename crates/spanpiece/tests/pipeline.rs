//! End-to-end pipeline validation: loaders, pre-tokenizers, and models
//! assembled into full tokenizers, with offsets checked against the raw
//! input.

use spanpiece::{
    Offsets, SpanpieceError,
    models::{
        bpe::{BpeModel, MergeMap},
        wordpiece::WordPieceModel,
    },
    normalizers::BertNormalizer,
    pretokenized::PreTokenizedString,
    pretokenizers::{
        BertPreTokenizer, ByteLevelPreTokenizer, MetaspacePreTokenizer, PreTokenizer,
        WhitespaceSplitPreTokenizer, byte_char,
    },
    tokenizer::Tokenizer,
    vocab::Vocabulary,
};

const UNRELATED_VOCAB_JSON: &str = r#"{
    "u": 0, "n": 1, "r": 2, "e": 3, "l": 4, "a": 5, "t": 6, "d": 7,
    "re": 8, "at": 9, "ed": 10, "un": 11, "ated": 12, "rel": 13,
    "related": 14, "unrelated": 15
}"#;

const UNRELATED_MERGES: &str = "#version: 0.2\n\
    r e\n\
    a t\n\
    e d\n\
    u n\n\
    at ed\n\
    re l\n\
    rel ated\n\
    un related\n";

fn unrelated_model() -> BpeModel<u32> {
    let vocab: Vocabulary<u32> = Vocabulary::from_json(UNRELATED_VOCAB_JSON).unwrap();
    let merges = MergeMap::from_merges_text(UNRELATED_MERGES, &vocab, 0).unwrap();
    BpeModel::new(vocab, merges)
}

#[test]
fn test_bpe_encode_from_loaded_files() {
    let tokenizer =
        Tokenizer::new(unrelated_model()).with_pre_tokenizer(WhitespaceSplitPreTokenizer);

    let encoding = tokenizer.encode("unrelated unrelated", 0).unwrap();

    assert_eq!(encoding.ids, vec![15, 15]);
    assert_eq!(encoding.tokens, vec!["unrelated", "unrelated"]);
    assert_eq!(
        encoding.offsets,
        vec![Offsets::new(0, 9), Offsets::new(10, 19)]
    );
    assert_eq!(encoding.word_indices, vec![Some(0), Some(1)]);
    assert_eq!(encoding.attention_mask, vec![1, 1]);
    assert_eq!(encoding.special_tokens_mask, vec![0, 0]);
}

#[test]
fn test_bpe_determinism() {
    let tokenizer =
        Tokenizer::new(unrelated_model()).with_pre_tokenizer(WhitespaceSplitPreTokenizer);

    let first = tokenizer.encode("unrelated related un", 0).unwrap();
    let second = tokenizer.encode("unrelated related un", 0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_bpe_full_dropout_yields_per_char_tokens() {
    let model = unrelated_model().with_dropout(1.0);
    let tokenizer = Tokenizer::new(model).with_pre_tokenizer(WhitespaceSplitPreTokenizer);

    let encoding = tokenizer.encode("unrelated", 0).unwrap();

    assert_eq!(encoding.len(), 9);
    assert_eq!(
        encoding.tokens,
        vec!["u", "n", "r", "e", "l", "a", "t", "e", "d"]
    );
    let expected: Vec<Offsets> = (0..9).map(|i| Offsets::new(i, i + 1)).collect();
    assert_eq!(encoding.offsets, expected);
}

#[test]
fn test_wordpiece_bert_pipeline_offsets_index_raw_input() {
    let vocab: Vocabulary<u32> = ["[UNK]", "hey", "friend", "!"].into_iter().collect();
    let tokenizer = Tokenizer::new(WordPieceModel::new(vocab))
        .with_normalizer(BertNormalizer::default())
        .with_pre_tokenizer(BertPreTokenizer);

    let text = "HEY Friend!";
    let encoding = tokenizer.encode(text, 0).unwrap();

    assert_eq!(encoding.tokens, vec!["hey", "friend", "!"]);
    // Each token's span decodes to the original text that produced it.
    let surfaces: Vec<&str> = encoding
        .offsets
        .iter()
        .map(|offsets| &text[offsets.start..offsets.end])
        .collect();
    assert_eq!(surfaces, vec!["HEY", "Friend", "!"]);
}

#[test]
fn test_wordpiece_cjk_pipeline() {
    let vocab: Vocabulary<u32> = ["[UNK]", "咖", "啡"].into_iter().collect();
    let tokenizer = Tokenizer::new(WordPieceModel::new(vocab))
        .with_normalizer(BertNormalizer::default())
        .with_pre_tokenizer(BertPreTokenizer);

    let text = "咖啡";
    let encoding = tokenizer.encode(text, 0).unwrap();

    assert_eq!(encoding.tokens, vec!["咖", "啡"]);
    assert_eq!(
        encoding.offsets,
        vec![Offsets::new(0, 3), Offsets::new(3, 6)]
    );
}

#[test]
fn test_metaspace_pipeline() {
    // One term per metaspace shard of "Hey   friend!".
    let vocab: Vocabulary<u32> = ["[UNK]", "▁Hey", "▁", "▁friend!"].into_iter().collect();
    let tokenizer = Tokenizer::new(
        WordPieceModel::new(vocab).with_max_input_chars_per_word(20),
    )
    .with_pre_tokenizer(MetaspacePreTokenizer::default());

    let encoding = tokenizer.encode("Hey   friend!", 0).unwrap();

    assert_eq!(encoding.tokens, vec!["▁Hey", "▁", "▁", "▁friend!"]);
    assert_eq!(
        encoding.offsets,
        vec![
            Offsets::new(0, 3),
            Offsets::new(3, 4),
            Offsets::new(4, 5),
            Offsets::new(5, 13),
        ]
    );
}

#[test]
fn test_byte_level_split_reassembly() {
    // The byte-level pre-tokenizer keeps every capture (Isolated), so the
    // splits' original texts reassemble the input exactly.
    let text = "The quick brown\nfox, jumps!";
    let mut pretokenized = PreTokenizedString::<u32>::from(text);
    ByteLevelPreTokenizer::default()
        .with_prefix_space(false)
        .pre_tokenize(&mut pretokenized)
        .unwrap();

    let mut reassembled = String::new();
    let mut cursor = 0;
    for split in pretokenized.original_byte_splits() {
        assert_eq!(split.offsets.start, cursor);
        cursor = split.offsets.end;
        reassembled.push_str(&text[split.offsets.start..split.offsets.end]);
    }
    assert_eq!(reassembled, text);
}

#[test]
fn test_byte_level_bpe_round_trip_spans() {
    // Vocabulary over byte-level surrogates: "Ġ" is the space byte.
    let vocab: Vocabulary<u32> = ["h", "i", "Ġ", "hi", "Ġhi"].into_iter().collect();
    let merges = "h i\nĠ hi\n";
    let vocab_model: Vocabulary<u32> = vocab.clone();
    let merge_map = MergeMap::from_merges_text(merges, &vocab, 0).unwrap();

    let tokenizer = Tokenizer::new(BpeModel::new(vocab_model, merge_map))
        .with_pre_tokenizer(ByteLevelPreTokenizer::default());

    let text = "hi hi";
    let encoding = tokenizer.encode(text, 0).unwrap();

    assert_eq!(encoding.tokens, vec!["Ġhi", "Ġhi"]);
    // The first token's span covers "hi" (the prefix space is virtual);
    // the second covers " hi".
    assert_eq!(
        encoding.offsets,
        vec![Offsets::new(0, 2), Offsets::new(2, 5)]
    );
}

#[test]
fn test_byte_char_table_is_a_bijection() {
    let mut seen = std::collections::HashSet::new();
    for byte in 0..=255u8 {
        assert!(seen.insert(byte_char(byte)));
    }
    assert_eq!(seen.len(), 256);
}

#[test]
fn test_unknown_token_errors_propagate_through_encode() {
    let vocab: Vocabulary<u32> = ["a"].into_iter().collect();
    let model = BpeModel::new(vocab, MergeMap::new()).with_unknown_token("<unk>");
    let tokenizer = Tokenizer::new(model).with_pre_tokenizer(WhitespaceSplitPreTokenizer);

    assert!(matches!(
        tokenizer.encode("b", 0),
        Err(SpanpieceError::UnknownTokenOutOfVocabulary)
    ));
}

#[test]
fn test_encode_with_u16_ids() {
    let vocab: Vocabulary<u16> = ["[UNK]", "hello"].into_iter().collect();
    let tokenizer = Tokenizer::new(WordPieceModel::new(vocab))
        .with_normalizer(BertNormalizer::default())
        .with_pre_tokenizer(BertPreTokenizer);

    let encoding = tokenizer.encode("HELLO hello", 1).unwrap();
    assert_eq!(encoding.ids, vec![1u16, 1]);
    assert_eq!(encoding.type_ids, vec![1, 1]);
}

#[test]
fn test_empty_input_produces_empty_encoding() {
    let vocab: Vocabulary<u32> = ["[UNK]"].into_iter().collect();
    let tokenizer = Tokenizer::new(WordPieceModel::new(vocab))
        .with_pre_tokenizer(WhitespaceSplitPreTokenizer);

    let encoding = tokenizer.encode("", 0).unwrap();
    assert!(encoding.is_empty());

    let encoding = tokenizer.encode("   ", 0).unwrap();
    assert!(encoding.is_empty());
}
