//! The deferred output value.
//!
//! An [`Output`] pairs a lazily-resolved payload with three facts that are
//! observable immediately:
//!
//! - **known**: whether a payload exists at all. Unknown outputs never carry
//!   one, and combinators skip their closures for them.
//! - **secret**: whether the payload must be treated as sensitive.
//! - **dependencies**: the URNs of resources the payload was derived from.
//!
//! The payload is a shared single-assignment future. Any number of clones may
//! await it; the producing computation runs once.
//!
//! # Example
//!
//! ```
//! use stratus_output::Output;
//! use stratus_resource::DependencySet;
//!
//! # futures::executor::block_on(async {
//! let password = Output::new(Some("hunter2".to_string()), true, DependencySet::new());
//! let length = password.map(|p| p.len());
//!
//! assert!(length.is_secret());
//! assert_eq!(length.resolve().await?, Some(7));
//! # Ok::<(), stratus_output::OutputError>(())
//! # }).unwrap();
//! ```

use crate::error::OutputError;
use core::fmt;
use core::future::Future;
use futures::future::{BoxFuture, FutureExt, Shared, try_join_all};
use std::sync::Arc;
use stratus_resource::{DependencySet, HandleTable, ResourceHandle};

type Payload<T> = Shared<BoxFuture<'static, Result<Settled<T>, OutputError>>>;

/// A fully resolved output.
///
/// `secret` and `dependencies` include anything declared after construction,
/// for example by the closure passed to [`Output::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settled<T> {
    /// The payload, or `None` if the value is unknown.
    pub value: Option<T>,
    /// Whether the payload is secret.
    pub secret: bool,
    /// Resources the payload depends on.
    pub dependencies: DependencySet,
}

impl<T> Settled<T> {
    /// Returns `true` if a payload is present.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.value.is_some()
    }
}

/// A deferred value with knowledge, secrecy and dependency metadata.
pub struct Output<T> {
    inner: Arc<OutputInner<T>>,
}

struct OutputInner<T> {
    known: bool,
    secret: bool,
    dependencies: DependencySet,
    handles: HandleTable,
    payload: Payload<T>,
}

impl<T> Clone for Output<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for Output<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("known", &self.inner.known)
            .field("secret", &self.inner.secret)
            .field("dependencies", &self.inner.dependencies)
            .finish_non_exhaustive()
    }
}

impl<T> Output<T> {
    /// Returns `true` if the output has a payload.
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.inner.known
    }

    /// Returns `true` if the payload is secret.
    #[must_use]
    pub fn is_secret(&self) -> bool {
        self.inner.secret
    }

    /// Returns the resources this output was declared to depend on.
    #[must_use]
    pub fn dependencies(&self) -> &DependencySet {
        &self.inner.dependencies
    }

    /// Returns `true` if both values are the same output.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + Send + Sync + 'static> Output<T> {
    /// Creates an output whose payload is already available.
    ///
    /// The output is known iff `value` is `Some`.
    #[must_use]
    pub fn new(value: Option<T>, secret: bool, dependencies: DependencySet) -> Self {
        Self::new_in(value, secret, dependencies, &HandleTable::new())
    }

    /// Creates an output that resolves dependencies through `handles`.
    ///
    /// Decoders pass the table of handles resolved during the same pass, so
    /// [`dependent_resources`](Self::dependent_resources) can return typed
    /// handles.
    #[must_use]
    pub fn new_in(
        value: Option<T>,
        secret: bool,
        dependencies: DependencySet,
        handles: &HandleTable,
    ) -> Self {
        let known = value.is_some();
        let settled = Settled {
            value,
            secret,
            dependencies: dependencies.clone(),
        };
        Self::from_parts(
            known,
            secret,
            dependencies,
            handles.clone(),
            futures::future::ready(Ok(settled)).boxed(),
        )
    }

    /// Creates a known, non-secret output without dependencies.
    #[must_use]
    pub fn known(value: T) -> Self {
        Self::new(Some(value), false, DependencySet::new())
    }

    /// Creates a known secret output without dependencies.
    #[must_use]
    pub fn secret(value: T) -> Self {
        Self::new(Some(value), true, DependencySet::new())
    }

    /// Creates an unknown output.
    #[must_use]
    pub fn unknown(dependencies: DependencySet) -> Self {
        Self::new(None, false, dependencies)
    }

    /// Creates a known output whose payload is produced by `future`.
    ///
    /// The future runs at most once, when the output is first awaited. Its
    /// error is what [`resolve`](Self::resolve) reports to every waiter.
    #[must_use]
    pub fn from_future<F>(future: F, secret: bool, dependencies: DependencySet) -> Self
    where
        F: Future<Output = Result<T, OutputError>> + Send + 'static,
    {
        let declared = dependencies.clone();
        let payload = async move {
            let value = future.await?;
            Ok(Settled {
                value: Some(value),
                secret,
                dependencies: declared,
            })
        };
        Self::from_parts(true, secret, dependencies, HandleTable::new(), payload.boxed())
    }

    fn from_parts(
        known: bool,
        secret: bool,
        dependencies: DependencySet,
        handles: HandleTable,
        payload: BoxFuture<'static, Result<Settled<T>, OutputError>>,
    ) -> Self {
        Self {
            inner: Arc::new(OutputInner {
                known,
                secret,
                dependencies,
                handles,
                payload: payload.shared(),
            }),
        }
    }

    /// An unknown output carrying this output's metadata.
    fn propagate_unknown<U: Clone + Send + Sync + 'static>(&self) -> Output<U> {
        Output::new_in(
            None,
            self.inner.secret,
            self.inner.dependencies.clone(),
            &self.inner.handles,
        )
    }

    /// Waits for the payload.
    ///
    /// Returns `Ok(None)` for unknown outputs.
    ///
    /// # Errors
    ///
    /// Returns the error of the computation that produced the payload.
    pub async fn resolve(&self) -> Result<Option<T>, OutputError> {
        Ok(self.settle().await?.value)
    }

    /// Waits for the payload together with its final secrecy and dependencies.
    ///
    /// # Errors
    ///
    /// Returns the error of the computation that produced the payload.
    pub async fn settle(&self) -> Result<Settled<T>, OutputError> {
        self.inner.payload.clone().await
    }

    /// Resolves every dependency to a resource handle.
    ///
    /// URNs whose handle was resolved in the decode pass that produced this
    /// output come back typed; the rest become dependency-only handles. The
    /// result holds one handle per URN.
    ///
    /// # Errors
    ///
    /// Returns the error of the computation that produced the payload.
    pub async fn dependent_resources(&self) -> Result<Vec<ResourceHandle>, OutputError> {
        let settled = self.settle().await?;
        let dependencies = self.inner.dependencies.clone().union(&settled.dependencies);
        Ok(dependencies
            .iter()
            .map(|urn| self.inner.handles.materialize(urn))
            .collect())
    }

    /// Transforms the payload.
    ///
    /// For unknown outputs `f` is never invoked and the result is unknown.
    /// Secrecy and dependencies carry over unchanged.
    #[must_use]
    pub fn map<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        if !self.is_known() {
            return self.propagate_unknown();
        }

        let payload = self.inner.payload.clone();
        let mapped = async move {
            let settled = payload.await?;
            Ok(Settled {
                value: settled.value.map(f),
                secret: settled.secret,
                dependencies: settled.dependencies,
            })
        };
        Output::from_parts(
            true,
            self.inner.secret,
            self.inner.dependencies.clone(),
            self.inner.handles.clone(),
            mapped.boxed(),
        )
    }

    /// Chains a computation that itself produces an output.
    ///
    /// For unknown outputs `f` is never invoked. Otherwise the settled result
    /// is secret if either side is, depends on the union of both sides, and is
    /// unknown if `f`'s output is. The synchronous flags of the returned
    /// output report this output's metadata; use [`settle`](Self::settle) to
    /// observe the union. Once settled, handles recorded for either side are
    /// available to [`dependent_resources`](Self::dependent_resources).
    #[must_use]
    pub fn apply<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> Output<U> + Send + 'static,
    {
        if !self.is_known() {
            return self.propagate_unknown();
        }

        let payload = self.inner.payload.clone();
        let source = self.inner.handles.clone();
        let handles = HandleTable::new();
        let merged = handles.clone();
        let chained = async move {
            let settled = payload.await?;
            merged.absorb(&source);
            let Some(value) = settled.value else {
                return Ok(Settled {
                    value: None,
                    secret: settled.secret,
                    dependencies: settled.dependencies,
                });
            };

            let next = f(value);
            let next_settled = next.settle().await?;
            merged.absorb(&next.inner.handles);
            Ok(Settled {
                value: next_settled.value,
                secret: settled.secret || next_settled.secret,
                dependencies: settled.dependencies.union(&next_settled.dependencies),
            })
        };
        Output::from_parts(
            true,
            self.inner.secret,
            self.inner.dependencies.clone(),
            handles,
            chained.boxed(),
        )
    }

    /// Combines outputs into one output of all their payloads.
    ///
    /// The result is known iff every input is known, secret if any input is,
    /// and depends on the union of all inputs' dependencies. Handles recorded
    /// for any input are available to
    /// [`dependent_resources`](Self::dependent_resources).
    #[must_use]
    pub fn all(outputs: impl IntoIterator<Item = Output<T>>) -> Output<Vec<T>> {
        let outputs: Vec<Output<T>> = outputs.into_iter().collect();

        let known = outputs.iter().all(Output::is_known);
        let secret = outputs.iter().any(Output::is_secret);
        let mut dependencies = DependencySet::new();
        for output in &outputs {
            dependencies.union_with(output.dependencies());
        }
        let handles = HandleTable::new();

        if !known {
            for output in &outputs {
                handles.absorb(&output.inner.handles);
            }
            return Output::new_in(None, secret, dependencies, &handles);
        }

        let declared = dependencies.clone();
        let merged = handles.clone();
        let combined = async move {
            let settled = try_join_all(outputs.iter().map(Output::settle)).await?;
            for output in &outputs {
                merged.absorb(&output.inner.handles);
            }

            let mut values = Vec::with_capacity(settled.len());
            let mut secret = secret;
            let mut dependencies = declared;
            let mut known = true;
            for item in settled {
                secret |= item.secret;
                dependencies.union_with(&item.dependencies);
                match item.value {
                    Some(value) => values.push(value),
                    None => known = false,
                }
            }

            Ok(Settled {
                value: known.then_some(values),
                secret,
                dependencies,
            })
        };
        Output::from_parts(true, secret, dependencies, handles, combined.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use stratus_resource::{Resource, Urn};

    fn deps(urns: &[&str]) -> DependencySet {
        urns.iter().copied().collect()
    }

    #[tokio::test]
    async fn known_output_resolves_payload() {
        let output = Output::new(Some("hi".to_string()), false, deps(&["fakeURN"]));

        assert!(output.is_known());
        assert!(!output.is_secret());
        assert_eq!(output.dependencies(), &deps(&["fakeURN"]));
        assert_eq!(output.resolve().await.unwrap(), Some("hi".to_string()));
    }

    #[tokio::test]
    async fn unknown_output_has_no_payload() {
        let output = Output::<String>::unknown(deps(&["fakeURN"]));

        assert!(!output.is_known());
        assert_eq!(output.resolve().await.unwrap(), None);
    }

    #[tokio::test]
    async fn map_skips_closure_when_unknown() {
        let invoked = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&invoked);

        let output = Output::<i32>::new(None, true, deps(&["a"]));
        let mapped = output.map(move |v| {
            flag.store(true, Ordering::SeqCst);
            v + 1
        });

        assert!(!mapped.is_known());
        assert!(mapped.is_secret());
        assert_eq!(mapped.dependencies(), &deps(&["a"]));
        assert_eq!(mapped.resolve().await.unwrap(), None);
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn map_keeps_secrecy_and_dependencies() {
        let output = Output::new(Some(20), true, deps(&["a", "b"]));
        let mapped = output.map(|v| v * 2 + 2);

        assert!(mapped.is_known());
        assert!(mapped.is_secret());
        assert_eq!(mapped.dependencies(), &deps(&["a", "b"]));
        assert_eq!(mapped.resolve().await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn apply_unions_declarations_of_inner_output() {
        let output = Output::new(Some(1), false, deps(&["a"]));
        let chained = output.apply(|v| Output::new(Some(v + 1), true, deps(&["b"])));

        assert!(!chained.is_secret());
        let settled = chained.settle().await.unwrap();
        assert_eq!(settled.value, Some(2));
        assert!(settled.secret);
        assert_eq!(settled.dependencies, deps(&["a", "b"]));

        let urns: Vec<_> = chained
            .dependent_resources()
            .await
            .unwrap()
            .iter()
            .map(|handle| handle.urn().to_string())
            .collect();
        assert_eq!(urns, ["a", "b"]);
    }

    #[tokio::test]
    async fn apply_to_unknown_inner_settles_unknown() {
        let output = Output::known(1);
        let chained = output.apply(|_| Output::<i32>::unknown(deps(&["late"])));

        let settled = chained.settle().await.unwrap();
        assert!(!settled.is_known());
        assert_eq!(settled.dependencies, deps(&["late"]));
    }

    #[tokio::test]
    async fn from_future_runs_once_for_all_clones() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);
        let output = Output::from_future(
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, OutputError>(7)
            },
            false,
            DependencySet::new(),
        );
        let clone = output.clone();

        assert_eq!(output.resolve().await.unwrap(), Some(7));
        assert_eq!(clone.resolve().await.unwrap(), Some(7));
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(output.ptr_eq(&clone));
    }

    #[tokio::test]
    async fn upstream_failure_propagates() {
        let output = Output::<i32>::from_future(
            async { Err(OutputError::upstream("engine unavailable")) },
            false,
            DependencySet::new(),
        );
        let mapped = output.map(|v| v + 1);

        assert_eq!(
            mapped.resolve().await.unwrap_err(),
            OutputError::upstream("engine unavailable")
        );
        assert!(output.dependent_resources().await.is_err());
    }

    #[tokio::test]
    async fn resolve_waits_for_pending_payload() {
        let (tx, rx) = tokio::sync::oneshot::channel::<i32>();
        let output = Output::from_future(
            async move { rx.await.map_err(|e| OutputError::upstream(e.to_string())) },
            false,
            DependencySet::new(),
        );

        let waiter = output.clone();
        let task = tokio::spawn(async move { waiter.resolve().await });
        tx.send(5).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), Some(5));
    }

    #[tokio::test]
    async fn all_combines_metadata() {
        let combined = Output::all([
            Output::new(Some(1), false, deps(&["a"])),
            Output::new(Some(2), true, deps(&["b", "a"])),
        ]);

        assert!(combined.is_known());
        assert!(combined.is_secret());
        assert_eq!(combined.dependencies(), &deps(&["a", "b"]));
        assert_eq!(combined.resolve().await.unwrap(), Some(vec![1, 2]));
    }

    #[tokio::test]
    async fn all_with_unknown_member_is_unknown() {
        let combined = Output::all([Output::known(1), Output::unknown(deps(&["u"]))]);

        assert!(!combined.is_known());
        assert_eq!(combined.dependencies(), &deps(&["u"]));
        assert_eq!(combined.resolve().await.unwrap(), None);
    }

    #[derive(Debug)]
    struct Database {
        urn: Urn,
    }

    impl Resource for Database {
        fn urn(&self) -> &Urn {
            &self.urn
        }
    }

    #[tokio::test]
    async fn dependent_resources_prefers_recorded_handles() {
        let typed_urn = Urn::new("urn:pulumi:s::p::db:index:Database::main");
        let handles = HandleTable::new();
        handles.record(&ResourceHandle::typed(
            typed_urn.clone(),
            Some("db-1".into()),
            Arc::new(Database {
                urn: typed_urn.clone(),
            }),
        ));

        let dependencies: DependencySet =
            [typed_urn.clone(), Urn::new("fakeURN"), typed_urn.clone()]
                .into_iter()
                .collect();
        let output = Output::new_in(Some(()), false, dependencies, &handles);

        let resources = output.dependent_resources().await.unwrap();
        assert_eq!(resources.len(), 2);
        assert!(resources[0].downcast_ref::<Database>().is_some());
        assert!(resources[1].is_dependency_only());
        assert_eq!(resources[1].urn().as_str(), "fakeURN");
    }

    fn database_in(handles: &HandleTable, name: &str) -> Urn {
        let urn = Urn::new(format!("urn:pulumi:s::p::db:index:Database::{name}"));
        handles.record(&ResourceHandle::typed(
            urn.clone(),
            Some(format!("{name}-id")),
            Arc::new(Database { urn: urn.clone() }),
        ));
        urn
    }

    #[tokio::test]
    async fn apply_keeps_typed_handles_of_inner_output() {
        let handles = HandleTable::new();
        let urn = database_in(&handles, "inner");
        let inner = Output::new_in(Some(2), false, [urn.clone()].into_iter().collect(), &handles);

        let chained = Output::known(1).apply(move |_| inner.clone());

        let resources = chained.dependent_resources().await.unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].urn(), &urn);
        assert!(resources[0].downcast_ref::<Database>().is_some());
    }

    #[tokio::test]
    async fn all_keeps_typed_handles_of_every_input() {
        let first = HandleTable::new();
        let second = HandleTable::new();
        let first_urn = database_in(&first, "first");
        let second_urn = database_in(&second, "second");

        let combined = Output::all([
            Output::new_in(Some(1), false, [first_urn].into_iter().collect(), &first),
            Output::new_in(Some(2), false, [second_urn].into_iter().collect(), &second),
        ]);

        let resources = combined.dependent_resources().await.unwrap();
        assert_eq!(resources.len(), 2);
        assert!(resources.iter().all(|handle| handle.downcast_ref::<Database>().is_some()));
    }

    #[tokio::test]
    async fn unknown_all_keeps_typed_handles_of_every_input() {
        let handles = HandleTable::new();
        let urn = database_in(&handles, "pending");

        let combined = Output::all([
            Output::known(1),
            Output::new_in(None, false, [urn].into_iter().collect(), &handles),
        ]);

        assert!(!combined.is_known());
        let resources = combined.dependent_resources().await.unwrap();
        assert!(resources[0].downcast_ref::<Database>().is_some());
    }
}
