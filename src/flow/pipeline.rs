//! One-ahead question prefetching.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::models::Question;
use crate::scheduler::SegmentRotation;

use super::generator::{GenerateError, QuestionGenerator};

/// Per-session prefetch state, shared between the requesting task and the
/// detached prefetch task.
struct PrefetchState {
    rotation: SegmentRotation,
    /// At most one generated-but-unconsumed question.
    cached: Option<Question>,
    /// Guard against overlapping prefetches.
    prefetching: bool,
    rng: StdRng,
}

/// Serves drill questions with segment rotation and a one-ahead prefetch.
///
/// While the learner answers question K, question K+1 is generated by a
/// detached task. [`QuestionFlow::request_next`] consumes the cache when
/// it resolved in time and otherwise generates on the spot. Usage history
/// is only updated when a question is actually consumed, so a prefetched
/// question that is never requested leaves its segment available for the
/// next session.
pub struct QuestionFlow {
    segments: Arc<Vec<String>>,
    generator: Arc<dyn QuestionGenerator>,
    state: Arc<Mutex<PrefetchState>>,
}

impl Clone for QuestionFlow {
    fn clone(&self) -> Self {
        Self {
            segments: Arc::clone(&self.segments),
            generator: Arc::clone(&self.generator),
            state: Arc::clone(&self.state),
        }
    }
}

impl QuestionFlow {
    /// Create a flow over the given theory segments.
    pub fn new(segments: Vec<String>, generator: Arc<dyn QuestionGenerator>) -> Self {
        Self::with_rng(segments, generator, StdRng::from_os_rng())
    }

    /// Create a flow with a deterministic segment-selection seed.
    pub fn with_seed(segments: Vec<String>, generator: Arc<dyn QuestionGenerator>, seed: u64) -> Self {
        Self::with_rng(segments, generator, StdRng::seed_from_u64(seed))
    }

    fn with_rng(segments: Vec<String>, generator: Arc<dyn QuestionGenerator>, rng: StdRng) -> Self {
        let rotation = SegmentRotation::new(segments.len());
        Self {
            segments: Arc::new(segments),
            generator,
            state: Arc::new(Mutex::new(PrefetchState {
                rotation,
                cached: None,
                prefetching: false,
                rng,
            })),
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Serve the next question.
    ///
    /// Consumes the prefetched question when one is cached; otherwise
    /// generates synchronously. Either way a new prefetch is started in
    /// the background before returning. Generation failures on this path
    /// are the caller's to handle.
    pub async fn request_next(&self) -> Result<Question, GenerateError> {
        if self.segments.is_empty() {
            return Err(GenerateError::EmptyPool);
        }

        let cached = {
            let mut state = self.state.lock().await;
            match state.cached.take() {
                Some(question) => {
                    state.rotation.mark_used(question.source_segment);
                    Some(question)
                }
                None => None,
            }
        };

        if let Some(question) = cached {
            debug!(segment = question.source_segment, "serving prefetched question");
            self.spawn_prefetch();
            return Ok(question);
        }

        // Nothing cached: generate on demand.
        let index = {
            let mut state = self.state.lock().await;
            let state = &mut *state;
            state.rotation.pick(&mut state.rng)
        };

        let mut question = self.generator.generate(&self.segments[index]).await?;
        question.source_segment = index;

        self.state.lock().await.rotation.mark_used(index);

        debug!(segment = index, "generated question on demand");
        self.spawn_prefetch();
        Ok(question)
    }

    fn spawn_prefetch(&self) {
        let flow = self.clone();
        tokio::spawn(async move {
            flow.prefetch_next().await;
        });
    }

    /// Generate the next question into the cache.
    ///
    /// No-op when a prefetch is already in flight or a cached question is
    /// waiting. Failures are logged and swallowed; the next request falls
    /// back to on-demand generation. Usage is deliberately not recorded
    /// here: that happens when the question is consumed.
    pub async fn prefetch_next(&self) {
        if self.segments.is_empty() {
            return;
        }

        let index = {
            let mut state = self.state.lock().await;
            if state.prefetching || state.cached.is_some() {
                return;
            }
            state.prefetching = true;
            let state = &mut *state;
            state.rotation.pick(&mut state.rng)
        };

        let outcome = self.generator.generate(&self.segments[index]).await;

        let mut state = self.state.lock().await;
        match outcome {
            Ok(mut question) => {
                question.source_segment = index;
                state.cached = Some(question);
                debug!(segment = index, "prefetched next question");
            }
            Err(error) => {
                warn!(segment = index, %error, "prefetch failed, next request generates on demand");
            }
        }
        state.prefetching = false;
    }

    /// Whether a prefetched question is waiting to be consumed.
    pub async fn has_prefetched(&self) -> bool {
        self.state.lock().await.cached.is_some()
    }

    /// Snapshot of the usage window, oldest first.
    pub async fn usage(&self) -> Vec<usize> {
        self.state.lock().await.rotation.usage().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use futures_util::future::BoxFuture;

    use super::*;

    /// Generator stub that counts invocations and optionally delays.
    struct StubGenerator {
        calls: AtomicUsize,
        delay: Option<Duration>,
        fail: bool,
    }

    impl StubGenerator {
        fn instant() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay: None,
                fail: false,
            })
        }

        fn slow(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay: Some(delay),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                delay: None,
                fail: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl QuestionGenerator for StubGenerator {
        fn generate<'a>(
            &'a self,
            segment: &'a str,
        ) -> BoxFuture<'a, Result<Question, GenerateError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }
                if self.fail {
                    return Err(GenerateError::Failed("stub failure".to_string()));
                }
                Ok(Question {
                    prompt: format!("about: {}", segment),
                    options: [
                        "a".to_string(),
                        "b".to_string(),
                        "c".to_string(),
                        "d".to_string(),
                    ],
                    correct_answer: 0,
                    source_segment: 0,
                })
            })
        }
    }

    fn segments(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("segment {}", i)).collect()
    }

    #[tokio::test]
    async fn test_empty_pool_is_an_error() {
        let generator = StubGenerator::instant();
        let flow = QuestionFlow::with_seed(Vec::new(), generator.clone(), 1);
        assert!(matches!(
            flow.request_next().await,
            Err(GenerateError::EmptyPool)
        ));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_synchronous_path_records_usage_immediately() {
        let generator = StubGenerator::instant();
        let flow = QuestionFlow::with_seed(segments(4), generator.clone(), 1);

        let question = flow.request_next().await.unwrap();
        // Single-threaded test runtime: the background prefetch has not
        // run yet, so exactly the synchronous generation is counted.
        assert_eq!(generator.calls(), 1);
        assert_eq!(flow.usage().await, vec![question.source_segment]);
    }

    #[tokio::test]
    async fn test_prefetch_is_single_flight() {
        let generator = StubGenerator::slow(Duration::from_millis(20));
        let flow = QuestionFlow::with_seed(segments(4), generator.clone(), 1);

        let first = flow.clone();
        let second = flow.clone();
        let a = tokio::spawn(async move { first.prefetch_next().await });
        let b = tokio::spawn(async move { second.prefetch_next().await });
        a.await.unwrap();
        b.await.unwrap();

        assert_eq!(generator.calls(), 1);
        assert!(flow.has_prefetched().await);
    }

    #[tokio::test]
    async fn test_unconsumed_prefetch_leaves_usage_untouched() {
        let generator = StubGenerator::instant();
        let flow = QuestionFlow::with_seed(segments(4), generator.clone(), 1);

        flow.prefetch_next().await;
        assert!(flow.has_prefetched().await);
        assert!(flow.usage().await.is_empty());
    }

    #[tokio::test]
    async fn test_consuming_the_cache_skips_synchronous_generation() {
        let generator = StubGenerator::instant();
        let flow = QuestionFlow::with_seed(segments(4), generator.clone(), 1);

        flow.prefetch_next().await;
        let calls_after_prefetch = generator.calls();
        assert_eq!(calls_after_prefetch, 1);

        let question = flow.request_next().await.unwrap();
        assert_eq!(generator.calls(), calls_after_prefetch);
        assert_eq!(flow.usage().await, vec![question.source_segment]);
        assert!(!flow.has_prefetched().await);
    }

    #[tokio::test]
    async fn test_prefetch_failure_is_swallowed() {
        let generator = StubGenerator::failing();
        let flow = QuestionFlow::with_seed(segments(4), generator.clone(), 1);

        flow.prefetch_next().await;
        assert!(!flow.has_prefetched().await);
        assert!(flow.usage().await.is_empty());

        // A later prefetch is not blocked by the failed one.
        flow.prefetch_next().await;
        assert_eq!(generator.calls(), 2);
    }

    #[tokio::test]
    async fn test_synchronous_failure_propagates() {
        let generator = StubGenerator::failing();
        let flow = QuestionFlow::with_seed(segments(4), generator.clone(), 1);

        let result = flow.request_next().await;
        assert!(matches!(result, Err(GenerateError::Failed(_))));
        assert!(flow.usage().await.is_empty());
    }

    #[tokio::test]
    async fn test_session_rotates_through_all_segments() {
        let generator = StubGenerator::instant();
        let flow = QuestionFlow::with_seed(segments(4), generator.clone(), 7);

        let mut served = Vec::new();
        for _ in 0..4 {
            let question = flow.request_next().await.unwrap();
            served.push(question.source_segment);
            // Drain the background prefetch between requests so served
            // questions come from both pipeline paths.
            tokio::task::yield_now().await;
        }

        let mut distinct = served.clone();
        distinct.sort_unstable();
        distinct.dedup();
        assert!(
            distinct.len() >= 3,
            "expected variety across segments, got {:?}",
            served
        );
    }
}
