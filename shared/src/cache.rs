//! Read-through cache for review API reads.
//!
//! Entries are keyed by operation and arguments. A fresh entry is served
//! without touching the network, identical concurrent reads share one
//! request, and a successful mutation marks whole key families stale before
//! its caller sees the result.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use derive_more::From;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use crate::api::{ApiError, ReviewQuery};
use crate::model::{ReviewDetail, ReviewListResponse, StatsSummary};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Reviews(ReviewQuery),
    Review(String),
    Stats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryFamily {
    Reviews,
    Review,
    Stats,
}

impl QueryKey {
    pub fn family(&self) -> QueryFamily {
        match self {
            QueryKey::Reviews(_) => QueryFamily::Reviews,
            QueryKey::Review(_) => QueryFamily::Review,
            QueryKey::Stats => QueryFamily::Stats,
        }
    }
}

#[derive(Debug, Clone, From)]
pub enum CachedValue {
    Reviews(Rc<ReviewListResponse>),
    Review(Rc<ReviewDetail>),
    Stats(Rc<StatsSummary>),
}

/// Response types the cache can hold.
pub trait Cacheable: Sized + 'static {
    fn into_cached(self) -> CachedValue;

    fn from_cached(value: &CachedValue) -> Option<Rc<Self>>;
}

impl Cacheable for ReviewListResponse {
    fn into_cached(self) -> CachedValue {
        Rc::new(self).into()
    }

    fn from_cached(value: &CachedValue) -> Option<Rc<Self>> {
        match value {
            CachedValue::Reviews(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl Cacheable for ReviewDetail {
    fn into_cached(self) -> CachedValue {
        Rc::new(self).into()
    }

    fn from_cached(value: &CachedValue) -> Option<Rc<Self>> {
        match value {
            CachedValue::Review(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl Cacheable for StatsSummary {
    fn into_cached(self) -> CachedValue {
        Rc::new(self).into()
    }

    fn from_cached(value: &CachedValue) -> Option<Rc<Self>> {
        match value {
            CachedValue::Stats(v) => Some(v.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a fetched entry is served without refetching.
    pub stale_time: Duration,
    /// How long an entry nobody reads is kept before it is evicted.
    pub gc_time: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            stale_time: Duration::seconds(30),
            gc_time: Duration::minutes(5),
        }
    }
}

type FetchOutcome = Result<CachedValue, ApiError>;
type SharedFetch = Shared<LocalBoxFuture<'static, FetchOutcome>>;

struct Slot {
    value: Option<CachedValue>,
    fetched_at: Option<DateTime<Utc>>,
    last_used: DateTime<Utc>,
    stale: bool,
    in_flight: Option<SharedFetch>,
    // replaced on invalidation; a fetch started under an older epoch may not
    // store its result. Epochs are unique across the cache, so a slot that
    // was evicted and recreated never matches a fetch from before.
    epoch: u64,
}

impl Slot {
    fn new(epoch: u64, now: DateTime<Utc>) -> Self {
        Self {
            value: None,
            fetched_at: None,
            last_used: now,
            stale: false,
            in_flight: None,
            epoch,
        }
    }

    fn fresh_value(&self, now: DateTime<Utc>, stale_time: Duration) -> Option<&CachedValue> {
        if self.stale {
            return None;
        }
        let fetched_at = self.fetched_at?;
        if now - fetched_at < stale_time {
            self.value.as_ref()
        } else {
            None
        }
    }
}

struct Inner {
    slots: RefCell<HashMap<QueryKey, Slot>>,
    next_epoch: Cell<u64>,
    config: CacheConfig,
    clock: Box<dyn Fn() -> DateTime<Utc>>,
}

/// Cheap to clone; clones share entries.
#[derive(Clone)]
pub struct QueryCache {
    inner: Rc<Inner>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, Utc::now)
    }

    pub fn with_clock<C>(config: CacheConfig, clock: C) -> Self
    where
        C: Fn() -> DateTime<Utc> + 'static,
    {
        Self {
            inner: Rc::new(Inner {
                slots: RefCell::new(HashMap::new()),
                next_epoch: Cell::new(0),
                config,
                clock: Box::new(clock),
            }),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        (self.inner.clock)()
    }

    fn new_epoch(&self) -> u64 {
        let epoch = self.inner.next_epoch.get();
        self.inner.next_epoch.set(epoch + 1);
        epoch
    }

    /// Drops entries with no request in flight that nobody has read within
    /// `gc_time`.
    fn evict_unused(&self, slots: &mut HashMap<QueryKey, Slot>, now: DateTime<Utc>) {
        let gc_time = self.inner.config.gc_time;
        let before = slots.len();
        slots.retain(|_, slot| slot.in_flight.is_some() || now - slot.last_used < gc_time);
        let evicted = before - slots.len();
        if evicted > 0 {
            log::debug!("evicted {} unused cache entries", evicted);
        }
    }

    /// Number of keys currently held, fresh or not.
    pub fn len(&self) -> usize {
        self.inner.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last known value for `key`, fresh or not.
    pub fn peek<T: Cacheable>(&self, key: &QueryKey) -> Option<Rc<T>> {
        self.inner
            .slots
            .borrow()
            .get(key)
            .and_then(|slot| slot.value.as_ref())
            .and_then(T::from_cached)
    }

    pub fn is_fresh(&self, key: &QueryKey) -> bool {
        let now = self.now();
        self.inner
            .slots
            .borrow()
            .get(key)
            .is_some_and(|slot| slot.fresh_value(now, self.inner.config.stale_time).is_some())
    }

    /// Cached value for `key`, or the outcome of `fetcher` if the entry is
    /// missing or stale. Joins a request already in flight for the same key.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Rc<T>, ApiError>
    where
        T: Cacheable,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
    {
        let now = self.now();
        let (request, epoch) = {
            let mut slots = self.inner.slots.borrow_mut();
            if !slots.contains_key(&key) {
                self.evict_unused(&mut slots, now);
            }
            let slot = slots
                .entry(key.clone())
                .or_insert_with(|| Slot::new(self.new_epoch(), now));
            slot.last_used = now;

            if let Some(value) = slot.fresh_value(now, self.inner.config.stale_time) {
                log::debug!("cache hit: {:?}", key);
                return T::from_cached(value).ok_or_else(|| type_mismatch(&key));
            }

            if let Some(request) = slot.in_flight.clone() {
                log::debug!("joining in-flight request: {:?}", key);
                (request, slot.epoch)
            } else {
                log::debug!("cache miss: {:?}", key);
                let request = fetcher()
                    .map(|outcome| outcome.map(T::into_cached))
                    .boxed_local()
                    .shared();
                slot.in_flight = Some(request.clone());
                (request, slot.epoch)
            }
        };

        let outcome = request.await;

        {
            let mut slots = self.inner.slots.borrow_mut();
            if let Some(slot) = slots.get_mut(&key) {
                if slot.epoch == epoch {
                    slot.in_flight = None;
                    if let Ok(value) = &outcome {
                        slot.value = Some(value.clone());
                        slot.fetched_at = Some(self.now());
                        slot.stale = false;
                    }
                } else {
                    log::debug!("dropping result fetched before invalidation: {:?}", key);
                }
            }
        }

        let value = outcome?;
        T::from_cached(&value).ok_or_else(|| type_mismatch(&key))
    }

    /// Marks every entry of `family` stale and detaches in-flight requests,
    /// so the next read goes to the network. Entries left idle past
    /// `gc_time` are evicted on the way.
    pub fn invalidate(&self, family: QueryFamily) {
        let now = self.now();
        let mut slots = self.inner.slots.borrow_mut();
        let mut count = 0;
        for (key, slot) in slots.iter_mut() {
            if key.family() == family {
                slot.stale = true;
                slot.in_flight = None;
                slot.epoch = self.new_epoch();
                count += 1;
            }
        }
        self.evict_unused(&mut slots, now);
        log::info!("invalidated {} {:?} entries", count, family);
    }

    /// Runs a write and, only if it succeeds, invalidates `families` before
    /// returning its result.
    pub async fn mutate<T, Fut>(&self, request: Fut, families: &[QueryFamily]) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let result = request.await?;
        for family in families {
            self.invalidate(*family);
        }
        Ok(result)
    }
}

fn type_mismatch(key: &QueryKey) -> ApiError {
    ApiError::Decode(format!("cached value has the wrong type for {:?}", key))
}
