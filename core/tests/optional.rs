//! Behaviour of the synchronous `Optional` container.

use std::any::Any;
use std::cell::Cell;
use std::collections::HashMap;

use fluent_optional::{Error, Optional};

const DEFINED_VALUE: i32 = 42;
const DEFAULT_VALUE: i32 = 8;

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("SpecialError")]
struct SpecialError;

#[test]
fn present_values_including_falsy_ones() {
  assert!(Optional::of(DEFINED_VALUE).is_present());
  assert!(Optional::of(0).is_present());
  assert!(Optional::of(false).is_present());
  assert!(Optional::of("").is_present());
  assert_eq!(Optional::of(DEFINED_VALUE).get(), Some(DEFINED_VALUE));

  assert!(Optional::<i32>::with(None).is_empty());
  assert!(!Optional::<i32>::empty().is_present());
  assert_eq!(Optional::<i32>::empty().get(), None);
}

#[test]
fn with_ensured_fails_at_call_time_on_empty_value() {
  let result = Optional::<i32>::with_ensured(None);
  assert!(matches!(result, Err(Error::IllegalValue)));

  let optional = Optional::with_ensured(Some(DEFINED_VALUE)).unwrap();
  assert_eq!(optional, Optional::of(DEFINED_VALUE));
}

#[test]
fn map_is_not_invoked_on_empty() {
  let called = Cell::new(false);
  let mapped = Optional::<i32>::empty().map(|x| {
    called.set(true);
    x + 1
  });
  assert!(!called.get());
  assert!(mapped.is_empty());
}

#[test]
fn map_chains() {
  assert_eq!(Optional::of(5).map(|x| x + 1).get(), Some(6));
  assert_eq!(Optional::of(5).map(|x| x + 1).map(|x| x + 1).get(), Some(7));
}

#[test]
fn map_opt_can_produce_empty() {
  assert!(Optional::of(DEFINED_VALUE).map_opt(|_| None::<i32>).is_empty());
  assert_eq!(Optional::of(DEFINED_VALUE).map_opt(|x| x.checked_add(1)).get(), Some(43));
}

#[test]
fn try_map_returns_callback_error_as_is() {
  let result = Optional::of(DEFINED_VALUE).try_map(|_| Err::<i32, _>(SpecialError));
  assert_eq!(result, Err(SpecialError));

  let result = Optional::<i32>::empty().try_map(|_| Err::<i32, _>(SpecialError));
  assert_eq!(result, Ok(Optional::empty()));
}

#[test]
#[should_panic(expected = "SpecialError")]
fn panicking_mapper_unwinds_synchronously() {
  let _ = Optional::of(DEFINED_VALUE).map(|_| -> i32 { panic!("SpecialError") });
}

#[test]
fn flat_map_replaces_the_optional() {
  assert_eq!(Optional::of(DEFINED_VALUE).flat_map(|x| Optional::of(x + 1)).get(), Some(43));
  assert!(Optional::of(DEFINED_VALUE).flat_map(|_| Optional::<i32>::empty()).is_empty());
  assert!(Optional::<i32>::empty().flat_map(|_| -> Optional<i32> { unreachable!() }).is_empty());
}

#[test]
fn flat_map_dyn_requires_an_optional() {
  let result = Optional::of(DEFINED_VALUE).flat_map_dyn::<i32>(|x| Box::new(x) as Box<dyn Any>);
  assert!(matches!(result, Err(Error::TypeExpectation { expected: "Optional" })));

  let result = Optional::of(DEFINED_VALUE).flat_map_dyn::<i32>(|x| Box::new(Optional::of(x + 1)));
  assert_eq!(result.unwrap().get(), Some(43));

  // A container of another value type is not the expected container.
  let result = Optional::of(DEFINED_VALUE).flat_map_dyn::<i32>(|x| Box::new(Optional::of(x as i64)));
  assert!(result.unwrap_err().is_type_expectation());
}

#[test]
fn filter_converts_present_to_empty() {
  let source = Optional::of(DEFINED_VALUE);
  let sibling = source.filter(|x| *x > 0);
  let filtered = source.filter(|x| *x > 100);
  assert!(filtered.is_empty());
  assert_eq!(sibling.get(), Some(DEFINED_VALUE));
  assert_eq!(source.get(), Some(DEFINED_VALUE));
}

#[test]
fn try_filter_propagates_predicate_error() {
  let result = Optional::of(DEFINED_VALUE).try_filter(|_| Err(SpecialError));
  assert_eq!(result, Err(SpecialError));
  assert_eq!(Optional::of(DEFINED_VALUE).try_filter(|_| Ok::<_, SpecialError>(true)), Ok(Optional::of(DEFINED_VALUE)));
}

#[test]
fn take_missing_property_is_empty() {
  let map = HashMap::from([("a", 1)]);
  assert!(Optional::of(map.clone()).take("b").is_empty());
  assert_eq!(Optional::of(map).take("a").get(), Some(1));
  assert_eq!(Optional::of(vec![1, 2, 3]).take(1).get(), Some(2));
  assert!(Optional::<Vec<i32>>::empty().take(0).is_empty());
}

#[test]
fn take_off_json_values() {
  use serde_json::json;

  assert!(Optional::of(json!({"a": 1})).take("b").is_empty());
  assert!(Optional::of(json!(5)).take("a").is_empty());
  assert_eq!(Optional::of(json!({"a": {"b": 2}})).take("a").take("b").get(), Some(json!(2)));
  assert!(Optional::from_json(json!(null)).is_empty());
}

#[test]
fn fallbacks_only_invoke_their_argument_when_empty() {
  assert_eq!(Optional::of(DEFINED_VALUE).or_use(DEFAULT_VALUE).get(), Some(DEFINED_VALUE));
  assert_eq!(Optional::<i32>::empty().or_use(DEFAULT_VALUE).get(), Some(DEFAULT_VALUE));

  assert_eq!(Optional::of(DEFINED_VALUE).or_compute(|| -> i32 { unreachable!() }).get(), Some(DEFINED_VALUE));
  assert_eq!(Optional::<i32>::empty().or_compute(|| DEFAULT_VALUE).get(), Some(DEFAULT_VALUE));
  assert!(Optional::<i32>::empty().or_compute(|| None).is_empty());

  assert_eq!(Optional::of(DEFINED_VALUE).or_flat_compute(|| unreachable!()).get(), Some(DEFINED_VALUE));
  assert_eq!(Optional::<i32>::empty().or_flat_compute(|| Optional::of(DEFAULT_VALUE)).get(), Some(DEFAULT_VALUE));
}

#[test]
fn try_or_compute_propagates_supplier_error() {
  assert_eq!(Optional::<i32>::empty().try_or_compute(|| Err::<i32, _>(SpecialError)), Err(SpecialError));
  assert_eq!(Optional::of(DEFINED_VALUE).try_or_compute(|| Err::<i32, _>(SpecialError)), Ok(Optional::of(DEFINED_VALUE)));
}

#[test]
fn or_flat_compute_dyn_requires_an_optional() {
  let result = Optional::<i32>::empty().or_flat_compute_dyn(|| Box::new(DEFAULT_VALUE));
  assert!(matches!(result, Err(Error::TypeExpectation { .. })));

  let result = Optional::<i32>::empty().or_flat_compute_dyn(|| Box::new(Optional::of(DEFAULT_VALUE)));
  assert_eq!(result.unwrap().get(), Some(DEFAULT_VALUE));

  let result = Optional::of(DEFINED_VALUE).or_flat_compute_dyn(|| unreachable!());
  assert_eq!(result.unwrap().get(), Some(DEFINED_VALUE));
}

#[test]
fn actions_run_only_in_matching_state() {
  let present = Cell::new(None);
  let absent = Cell::new(false);

  Optional::of(DEFINED_VALUE).if_present(|x| present.set(Some(*x)));
  Optional::of(DEFINED_VALUE).if_absent(|| absent.set(true));
  assert_eq!(present.get(), Some(DEFINED_VALUE));
  assert!(!absent.get());

  present.set(None);
  Optional::<i32>::empty().if_present(|x| present.set(Some(*x)));
  Optional::<i32>::empty().if_absent(|| absent.set(true));
  assert_eq!(present.get(), None);
  assert!(absent.get());
}

#[test]
fn either_or_invokes_exactly_one_branch() {
  for optional in [Optional::of(DEFINED_VALUE), Optional::empty()] {
    let presence = Cell::new(0);
    let absence = Cell::new(0);
    optional
      .either(|_| presence.set(presence.get() + 1))
      .or(|| absence.set(absence.get() + 1));
    assert_eq!(presence.get() + absence.get(), 1);
    assert_eq!(presence.get() == 1, optional.is_present());
  }
}

#[test]
fn either_or_with_optional_absence_action() {
  let absence = Cell::new(false);
  Optional::<i32>::empty().either_or(|_| unreachable!(), Some(|| absence.set(true)));
  assert!(absence.get());

  Optional::<i32>::empty().either_or(|_| unreachable!(), None::<fn()>);

  let presence = Cell::new(None);
  Optional::of(DEFINED_VALUE).either_or(|x| presence.set(Some(*x)), Some(|| unreachable!()));
  assert_eq!(presence.get(), Some(DEFINED_VALUE));
}

#[test]
fn get_or_default_and_compute() {
  assert_eq!(Optional::of(DEFINED_VALUE).get_or_default(DEFAULT_VALUE), DEFINED_VALUE);
  assert_eq!(Optional::empty().get_or_default(DEFAULT_VALUE), DEFAULT_VALUE);
  assert_eq!(Optional::of(DEFINED_VALUE).get_or_compute(|| unreachable!()), DEFINED_VALUE);
  assert_eq!(Optional::empty().get_or_compute(|| DEFAULT_VALUE), DEFAULT_VALUE);
}

#[test]
fn conversions() {
  let optional: Optional<i32> = Some(DEFINED_VALUE).into();
  let option: Option<i32> = optional.into();
  assert_eq!(option, Some(DEFINED_VALUE));
  assert_eq!(Optional::<i32>::default(), Optional::empty());
}

#[tokio::test]
async fn into_async_keeps_the_value() {
  let value = Optional::of(DEFINED_VALUE).into_async().get().await.unwrap();
  assert_eq!(value, Some(DEFINED_VALUE));
}

#[test]
fn serializes_as_a_plain_option() {
  assert_eq!(serde_json::to_string(&Optional::of(DEFINED_VALUE)).unwrap(), "42");
  assert_eq!(serde_json::to_string(&Optional::<i32>::empty()).unwrap(), "null");
  let optional: Optional<i32> = serde_json::from_str("null").unwrap();
  assert!(optional.is_empty());
}
