//! Re-home a source under a different annotation namespace.

use async_trait::async_trait;

use confweave_core::{Slot, Source, SourceError};

/// Wraps a source so it claims `name` instead of its own namespace.
///
/// Lets the same backend be registered twice under distinct annotations,
/// or an existing source slot into a schema written for another name.
pub struct WithNamespace<S> {
    name: String,
    inner: S,
}

impl<S: Source> WithNamespace<S> {
    pub fn new(name: impl Into<String>, inner: S) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }
}

#[async_trait]
impl<S: Source> Source for WithNamespace<S> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn apply(&self, slot: &mut dyn Slot, directive: &str) -> Result<(), SourceError> {
        self.inner.apply(slot, directive).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confweave_core::ConvertError;

    struct Upper;

    #[async_trait]
    impl Source for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        async fn apply(&self, slot: &mut dyn Slot, directive: &str) -> Result<(), SourceError> {
            Ok(slot.set_text(&directive.to_uppercase())?)
        }
    }

    struct TestSlot(Option<String>);

    impl Slot for TestSlot {
        fn name(&self) -> &str {
            "field"
        }

        fn set_text(&mut self, value: &str) -> Result<(), ConvertError> {
            self.0 = Some(value.to_owned());
            Ok(())
        }
    }

    #[test]
    fn reports_the_overriding_namespace() {
        let wrapped = WithNamespace::new("custom", Upper);
        assert_eq!(wrapped.name(), "custom");
    }

    #[tokio::test]
    async fn delegates_apply_to_the_inner_source() {
        let wrapped = WithNamespace::new("custom", Upper);
        let mut slot = TestSlot(None);
        wrapped.apply(&mut slot, "hello").await.unwrap();
        assert_eq!(slot.0.as_deref(), Some("HELLO"));
    }

    #[tokio::test]
    async fn propagates_inner_errors() {
        struct Failing;

        #[async_trait]
        impl Source for Failing {
            fn name(&self) -> &str {
                "failing"
            }

            async fn apply(&self, _: &mut dyn Slot, _: &str) -> Result<(), SourceError> {
                Err(SourceError::Backend("boom".to_owned()))
            }
        }

        let wrapped = WithNamespace::new("custom", Failing);
        let mut slot = TestSlot(None);
        let err = wrapped.apply(&mut slot, "x").await.unwrap_err();
        assert!(matches!(err, SourceError::Backend(_)));
    }
}
