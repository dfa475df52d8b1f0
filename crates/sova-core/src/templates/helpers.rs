//! Strict replacements for the built-in conditional helpers
//!
//! Stock `if`, `unless`, `or` and `and` treat a missing field as falsy even in
//! strict mode. These versions fail with `MissingVariable` instead, so a typo in
//! a feature flag cannot silently drop a block.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, JsonTruthy, Output, PathAndJson,
    RenderContext, RenderError, RenderErrorReason, Renderable, ScopedJson,
};
use serde_json::Value;

pub(crate) fn register(registry: &mut Handlebars<'_>) {
    registry.register_helper("if", Box::new(StrictIf { negate: false }));
    registry.register_helper("unless", Box::new(StrictIf { negate: true }));
    registry.register_helper("or", Box::new(StrictLogic::Or));
    registry.register_helper("and", Box::new(StrictLogic::And));
}

/// Parameter `index`, which must resolve to a value in the context
fn require_param<'a, 'rc>(
    h: &'a Helper<'rc>,
    helper: &'static str,
    index: usize,
) -> Result<&'a PathAndJson<'rc>, RenderError> {
    let param = h
        .param(index)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex(helper, index))?;
    if param.is_value_missing() {
        let field = param.relative_path().cloned();
        return Err(RenderErrorReason::MissingVariable(field).into());
    }
    Ok(param)
}

struct StrictIf {
    negate: bool,
}

impl HelperDef for StrictIf {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let helper = if self.negate { "unless" } else { "if" };
        let truthy = require_param(h, helper, 0)?.value().is_truthy(false);

        let branch = if truthy != self.negate {
            h.template()
        } else {
            h.inverse()
        };
        match branch {
            Some(template) => template.render(r, ctx, rc, out),
            None => Ok(()),
        }
    }
}

enum StrictLogic {
    Or,
    And,
}

impl HelperDef for StrictLogic {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let helper = match self {
            Self::Or => "or",
            Self::And => "and",
        };
        if h.params().is_empty() {
            return Err(RenderErrorReason::ParamNotFoundForIndex(helper, 0).into());
        }

        let mut values = Vec::with_capacity(h.params().len());
        for index in 0..h.params().len() {
            values.push(require_param(h, helper, index)?.value().is_truthy(false));
        }
        let result = match self {
            Self::Or => values.iter().any(|v| *v),
            Self::And => values.iter().all(|v| *v),
        };
        Ok(ScopedJson::Derived(Value::Bool(result)))
    }
}
