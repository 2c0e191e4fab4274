use crate::attributes::Method;
use crate::model::Button;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The host chart's update methods a button can trigger.
///
/// Implementations return a message on failure; [`MethodCall::invoke`] wraps it in
/// [`Error::ChartMethod`].
pub trait ChartApi {
    fn restyle(&mut self, args: [&Value; 3]) -> std::result::Result<(), String>;
    fn relayout(&mut self, args: [&Value; 3]) -> std::result::Result<(), String>;
    fn filter(&mut self, args: [&Value; 3]) -> std::result::Result<(), String>;
}

/// The side effect of selecting a button: call `method` with `args` on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodCall {
    pub button: usize,
    pub method: Method,
    pub args: Vec<Value>,
}

impl MethodCall {
    pub fn for_button(index: usize, button: &Button) -> Self {
        Self {
            button: index,
            method: button.method,
            args: button.args.clone(),
        }
    }

    pub fn invoke(&self, chart: &mut dyn ChartApi) -> Result<()> {
        let null = Value::Null;
        let arg = |i: usize| self.args.get(i).unwrap_or(&null);
        let args = [arg(0), arg(1), arg(2)];

        let res = match self.method {
            Method::Restyle => chart.restyle(args),
            Method::Relayout => chart.relayout(args),
            Method::Filter => chart.filter(args),
        };
        res.map_err(|message| Error::ChartMethod {
            method: self.method.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<(Method, Vec<Value>)>,
    }

    impl ChartApi for Recorder {
        fn restyle(&mut self, args: [&Value; 3]) -> std::result::Result<(), String> {
            self.calls
                .push((Method::Restyle, args.iter().map(|v| (*v).clone()).collect()));
            Ok(())
        }
        fn relayout(&mut self, args: [&Value; 3]) -> std::result::Result<(), String> {
            self.calls
                .push((Method::Relayout, args.iter().map(|v| (*v).clone()).collect()));
            Ok(())
        }
        fn filter(&mut self, _args: [&Value; 3]) -> std::result::Result<(), String> {
            Err("filter transforms are not registered".to_string())
        }
    }

    #[test]
    fn invoke_dispatches_on_method() {
        let button = Button::new("Log", Method::Relayout, vec![json!({"yaxis.type": "log"})]);
        let call = MethodCall::for_button(1, &button);

        let mut chart = Recorder::default();
        call.invoke(&mut chart).expect("relayout ok");

        assert_eq!(chart.calls.len(), 1);
        assert_eq!(chart.calls[0].0, Method::Relayout);
        assert_eq!(
            chart.calls[0].1,
            vec![json!({"yaxis.type": "log"}), Value::Null, Value::Null]
        );
    }

    #[test]
    fn host_failures_become_chart_method_errors() {
        let call = MethodCall::for_button(0, &Button::new("F", Method::Filter, vec![]));
        let err = call.invoke(&mut Recorder::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Chart method filter failed: filter transforms are not registered"
        );
    }
}
