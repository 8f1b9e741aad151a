use super::*;
use std::path::PathBuf;

fn cosine(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

mod config_tests {
    use super::*;

    #[test]
    fn test_encoder_config_default() {
        let config = EncoderConfig::default();
        assert_eq!(config.max_seq_len, crate::constants::DEFAULT_MAX_SEQ_LEN);
        assert_eq!(config.stub_dim, crate::constants::STUB_EMBEDDING_DIM);
        assert!(!config.testing_stub);
        assert!(config.model_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_encoder_config_new() {
        let config = EncoderConfig::new("/models/all-MiniLM-L6-v2").with_max_seq_len(128);
        assert_eq!(config.model_dir, PathBuf::from("/models/all-MiniLM-L6-v2"));
        assert_eq!(config.max_seq_len, 128);
        assert!(!config.testing_stub);
    }

    #[test]
    fn test_validation_with_stub() {
        assert!(EncoderConfig::stub().validate().is_ok());
    }

    #[test]
    fn test_validation_stub_zero_dim() {
        let config = EncoderConfig {
            stub_dim: 0,
            ..EncoderConfig::stub()
        };
        assert!(matches!(
            config.validate(),
            Err(EmbeddingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validation_empty_dir_no_stub() {
        let result = EncoderConfig::default().validate();
        assert!(matches!(result, Err(EmbeddingError::InvalidConfig { .. })));
    }

    #[test]
    fn test_validation_nonexistent_dir() {
        let result = EncoderConfig::new("/nonexistent/model").validate();
        assert!(matches!(result, Err(EmbeddingError::ModelNotFound { .. })));
    }

    #[test]
    fn test_model_available_requires_all_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = EncoderConfig::new(dir.path());
        assert!(!config.model_available());

        std::fs::write(dir.path().join("config.json"), "{}").expect("write");
        std::fs::write(dir.path().join("tokenizer.json"), "{}").expect("write");
        assert!(!config.model_available());

        std::fs::write(dir.path().join("model.safetensors"), b"").expect("write");
        assert!(config.model_available());
    }
}

mod load_tests {
    use super::*;

    #[test]
    fn test_load_stub() {
        let encoder = SentenceEncoder::load(EncoderConfig::stub()).expect("stub loads");
        assert!(encoder.is_stub());
        assert_eq!(encoder.name(), "stub");
        assert!(format!("{:?}", encoder).contains("Stub"));
    }

    #[test]
    fn test_load_missing_model_fails() {
        let err = SentenceEncoder::load(EncoderConfig::new("/nonexistent/model")).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelNotFound { .. }));
    }

    #[test]
    fn test_load_corrupt_model_fails() {
        let dir = tempfile::tempdir().expect("temp dir");
        for name in REQUIRED_MODEL_FILES {
            std::fs::write(dir.path().join(name), b"not a model").expect("write");
        }

        let err = SentenceEncoder::load(EncoderConfig::new(dir.path())).unwrap_err();
        assert!(matches!(err, EmbeddingError::ModelLoadFailed { .. }));
    }
}

mod stub_tests {
    use super::*;

    fn stub() -> SentenceEncoder {
        SentenceEncoder::load(EncoderConfig::stub()).expect("stub loads")
    }

    #[test]
    fn test_stub_dimension_and_norm() {
        let embedding = stub()
            .embed("Quarterly revenue grew by twelve percent")
            .expect("embed");
        assert_eq!(embedding.len(), crate::constants::STUB_EMBEDDING_DIM);

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(fnv1a(b""), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1a(b"a"), 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_stub_bucket_is_pinned() {
        let embedding = stub().embed("Harbour").expect("embed");
        assert_eq!(embedding[360], 1.0);
        assert_eq!(embedding.iter().filter(|&&x| x != 0.0).count(), 1);
    }

    #[test]
    fn test_stub_is_deterministic() {
        let encoder = stub();
        let a = encoder.embed("same input text").expect("embed");
        let b = encoder.embed("same input text").expect("embed");
        assert_eq!(a, b);
    }

    #[test]
    fn test_stub_ignores_case_and_punctuation() {
        let encoder = stub();
        let a = encoder.embed("Hello, World!").expect("embed");
        let b = encoder.embed("hello world").expect("embed");
        assert!((cosine(&a, &b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stub_overlap_scores_higher_than_disjoint() {
        let encoder = stub();
        let base = encoder
            .embed("the reactor cooling system failed during the test")
            .expect("embed");
        let close = encoder
            .embed("the reactor cooling system failed during a drill")
            .expect("embed");
        let far = encoder
            .embed("bananas ripen quickly beside apples")
            .expect("embed");

        assert!(cosine(&base, &close) > cosine(&base, &far));
    }

    #[test]
    fn test_stub_empty_text_is_zero_vector() {
        let embedding = stub().embed("").expect("embed");
        assert!(embedding.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_embed_batch_preserves_order_and_count() {
        let encoder = stub();
        let texts = ["first chunk of text", "second chunk", "third"];
        let batch = encoder.embed_batch(&texts).expect("batch");

        assert_eq!(batch.len(), 3);
        for (text, embedding) in texts.iter().zip(&batch) {
            assert_eq!(embedding, &encoder.embed(text).expect("embed"));
        }
    }
}
