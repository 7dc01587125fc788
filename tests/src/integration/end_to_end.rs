//! Registry + indexer choreography.
//!
//! Wires the asset registry's annotator into the block indexer and
//! drives confirmed blocks through the full fetch/annotate/commit
//! cycle, the way a node runtime composes the two subsystems.

use crate::support::{build_chain, define_request, harness, transfer_tx, FlakyChainSource};
use asset_registry::ASSET_ANNOTATION_NAMESPACE;
use block_indexer::{
    AnnotatorRegistry, BlockIndexer, InMemoryIndexStore, IndexStore, IndexerConfig, StepOutcome,
};
use shared_types::{AnnotationFragment, AssetId, TagValue, Transaction};
use std::sync::Arc;
use std::time::Duration;

fn fast_config() -> IndexerConfig {
    IndexerConfig {
        poll_interval: Duration::from_millis(1),
        max_backoff: Duration::from_millis(4),
    }
}

fn account_stub(_tx: &Transaction) -> Result<AnnotationFragment, shared_types::AnnotationError> {
    Ok(AnnotationFragment::from([(
        "owner".to_string(),
        TagValue::from("treasury"),
    )]))
}

#[tokio::test]
async fn test_indexed_history_carries_asset_metadata() {
    let h = harness();

    let mut req = define_request(Some("usd-token"), None);
    req.tags.insert("currency".into(), TagValue::from("USD"));
    let usd = h.registry.define(req).await.unwrap();

    let unknown = AssetId([0xEE; 32]);
    let chain = Arc::new(build_chain(vec![
        vec![transfer_tx(1, &[usd.id])],
        vec![transfer_tx(2, &[usd.id, unknown])],
    ]));

    let mut annotators = AnnotatorRegistry::new();
    annotators
        .register(ASSET_ANNOTATION_NAMESPACE, h.registry.annotator())
        .unwrap();
    annotators.register("account", account_stub).unwrap();

    let index = Arc::new(InMemoryIndexStore::new());
    let indexer = BlockIndexer::new(chain, index.clone(), annotators, fast_config()).unwrap();

    assert!(matches!(
        indexer.index_next().await.unwrap(),
        StepOutcome::Committed { height: 1, .. }
    ));
    assert!(matches!(
        indexer.index_next().await.unwrap(),
        StepOutcome::Committed { height: 2, .. }
    ));

    let records = index.transactions(1, 2).unwrap();
    assert_eq!(records.len(), 2);

    // Both namespaces present, unaltered, on every record.
    for record in &records {
        let asset_fragment = &record.annotations[ASSET_ANNOTATION_NAMESPACE];
        let entry = &asset_fragment[&usd.id.to_hex()];
        let TagValue::Object(fields) = entry else {
            panic!("asset entry must be an object");
        };
        assert_eq!(fields["alias"], TagValue::from("usd-token"));
        assert_eq!(
            record.annotations["account"]["owner"],
            TagValue::from("treasury")
        );
    }

    // The second block's reference to a never-defined asset is recorded,
    // not fatal.
    let second = &records[1];
    assert_eq!(
        second.annotations[ASSET_ANNOTATION_NAMESPACE]["unresolved"],
        TagValue::Array(vec![TagValue::String(unknown.to_hex())])
    );
}

#[tokio::test]
async fn test_crash_resume_produces_identical_index() {
    let h = harness();
    let asset = h.registry.define(define_request(Some("gold"), None)).await.unwrap();

    let blocks: Vec<_> = (1..=6u8)
        .map(|i| vec![transfer_tx(i, &[asset.id])])
        .collect();

    let index_once = |store: Arc<InMemoryIndexStore>, steps: &[usize]| {
        let h_registry = h.registry.clone();
        let blocks = blocks.clone();
        let steps = steps.to_vec();
        async move {
            for step in steps {
                let chain = Arc::new(build_chain(blocks.clone()));
                let mut annotators = AnnotatorRegistry::new();
                annotators
                    .register(ASSET_ANNOTATION_NAMESPACE, h_registry.annotator())
                    .unwrap();
                // Each loop iteration is a fresh process: new indexer,
                // same store.
                let indexer =
                    BlockIndexer::new(chain, store.clone(), annotators, fast_config()).unwrap();
                for _ in 0..step {
                    indexer.index_next().await.unwrap();
                }
            }
        }
    };

    let uninterrupted = Arc::new(InMemoryIndexStore::new());
    index_once(uninterrupted.clone(), &[6]).await;

    let interrupted = Arc::new(InMemoryIndexStore::new());
    index_once(interrupted.clone(), &[2, 3, 1]).await;

    assert_eq!(
        uninterrupted.transactions(1, 6).unwrap(),
        interrupted.transactions(1, 6).unwrap()
    );
    assert_eq!(
        uninterrupted.cursor().unwrap(),
        interrupted.cursor().unwrap()
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_transient_chain_outage_recovers_via_backoff() {
    let h = harness();
    let asset = h.registry.define(define_request(None, None)).await.unwrap();

    let chain = Arc::new(FlakyChainSource::new(
        build_chain(vec![
            vec![transfer_tx(1, &[asset.id])],
            vec![transfer_tx(2, &[asset.id])],
        ]),
        3,
    ));

    let index = Arc::new(InMemoryIndexStore::new());
    let indexer = Arc::new(
        BlockIndexer::new(chain, index.clone(), AnnotatorRegistry::new(), fast_config()).unwrap(),
    );

    let handle = tokio::spawn({
        let indexer = indexer.clone();
        async move { indexer.run().await }
    });

    for _ in 0..500 {
        if index.cursor().unwrap() == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    indexer.shutdown();
    handle.await.unwrap().unwrap();

    assert_eq!(index.cursor().unwrap(), 2);
    assert_eq!(index.record_count(), 2);
}

#[tokio::test]
async fn test_archived_asset_annotated_as_archived() {
    let h = harness();
    let asset = h.registry.define(define_request(Some("gold"), None)).await.unwrap();
    h.registry.archive(asset.id).await.unwrap();

    let chain = Arc::new(build_chain(vec![vec![transfer_tx(1, &[asset.id])]]));
    let mut annotators = AnnotatorRegistry::new();
    annotators
        .register(ASSET_ANNOTATION_NAMESPACE, h.registry.annotator())
        .unwrap();

    let index = Arc::new(InMemoryIndexStore::new());
    let indexer = BlockIndexer::new(chain, index.clone(), annotators, fast_config()).unwrap();
    indexer.index_next().await.unwrap();

    let records = index.transactions(1, 1).unwrap();
    let entry = &records[0].annotations[ASSET_ANNOTATION_NAMESPACE][&asset.id.to_hex()];
    let TagValue::Object(fields) = entry else {
        panic!("asset entry must be an object");
    };
    assert_eq!(fields["archived"], TagValue::Bool(true));
}
