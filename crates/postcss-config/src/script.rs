//! Script config loading.
//!
//! `postcss.config.js` and friends are parsed with SWC and their exported
//! value is evaluated statically, without running any JavaScript. Supported
//! export forms:
//! - `export default <expr>` and `export default function (ctx) { ... }`
//! - `module.exports = <expr>`
//! - identifiers bound by top-level `const`/`let`/`var` or function declarations
//!
//! Exported functions are invoked with the [`ConfigContext`]. Calls to unknown
//! helpers taking a single object (`defineConfig({ ... })`) evaluate to their
//! argument; any other call, such as `require('autoprefixer')`, is opaque and
//! evaluates to `null`.

use crate::context::ConfigContext;
use crate::error::LoadError;
use crate::loaders::Loader;
use camino::Utf8Path;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::sync::Arc;
use swc_common::{FileName, SourceMap};
use swc_ecma_ast::{
    ArrowExpr, AssignExpr, AssignOp, AssignTarget, BinaryOp, BlockStmt, BlockStmtOrExpr, Callee,
    Decl, DefaultDecl, Expr, Function, Lit, MemberExpr, MemberProp, Module, ModuleDecl,
    ModuleItem, ObjectPatProp, Pat, Prop, PropName, PropOrSpread, SimpleAssignTarget, Stmt,
    UnaryOp, VarDeclarator,
};
use swc_ecma_parser::{parse_file_as_module, EsSyntax, Syntax, TsSyntax};

/// Nesting limit for identifier indirection and nested literals.
const MAX_DEPTH: usize = 64;

/// Loads JavaScript or TypeScript config modules.
#[derive(Debug, Clone, Copy)]
pub struct ScriptLoader {
    typescript: bool,
}

impl ScriptLoader {
    /// A loader for `.js`, `.cjs` and `.mjs` files.
    pub fn javascript() -> Self {
        Self { typescript: false }
    }

    /// A loader for `.ts` and `.cts` files.
    #[cfg(feature = "typescript")]
    pub fn typescript() -> Self {
        Self { typescript: true }
    }
}

impl Loader for ScriptLoader {
    fn load(
        &self,
        path: &Utf8Path,
        content: &str,
        ctx: &ConfigContext,
    ) -> Result<Value, LoadError> {
        let module = parse_module(path, content, self.typescript)?;
        evaluate_module(&module, ctx)
    }
}

/// Parses a config file into a module.
fn parse_module(path: &Utf8Path, content: &str, typescript: bool) -> Result<Module, LoadError> {
    let cm: Arc<SourceMap> = Default::default();
    let fm = cm.new_source_file(
        FileName::Custom(path.to_string()).into(),
        content.to_string(),
    );

    let syntax = if typescript {
        Syntax::Typescript(TsSyntax {
            tsx: false,
            ..Default::default()
        })
    } else {
        Syntax::Es(EsSyntax {
            jsx: false,
            ..Default::default()
        })
    };

    parse_file_as_module(
        &fm,
        syntax,
        swc_ecma_ast::EsVersion::Es2022,
        None,
        &mut Vec::new(),
    )
    .map_err(|e| LoadError::Syntax(e.kind().msg().into_owned()))
}

/// What the module exports.
enum Export<'a> {
    Expr(&'a Expr),
    Function(&'a Function),
}

/// Evaluates the default export of a parsed module.
fn evaluate_module(module: &Module, ctx: &ConfigContext) -> Result<Value, LoadError> {
    let mut scope = Scope::new(ctx);
    let mut export = None;

    for item in &module.body {
        match item {
            ModuleItem::Stmt(Stmt::Decl(decl)) => scope.declare(decl),
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export_decl)) => {
                scope.declare(&export_decl.decl)
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(default)) => {
                export = Some(Export::Expr(&default.expr));
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(default)) => {
                if let DefaultDecl::Fn(f) = &default.decl {
                    export = Some(Export::Function(&f.function));
                }
            }
            ModuleItem::Stmt(Stmt::Expr(stmt)) => {
                if let Some(rhs) = module_exports_assignment(&stmt.expr) {
                    export = Some(Export::Expr(rhs));
                }
            }
            _ => {}
        }
    }

    match export.ok_or(LoadError::NoExport)? {
        Export::Function(function) => scope.invoke(Callable::Function(function), 0),
        Export::Expr(expr) => match scope.callable(expr, 0)? {
            Some(callable) => scope.invoke(callable, 0),
            None => scope.eval(expr, 0),
        },
    }
}

/// Returns the right-hand side of `module.exports = <expr>`.
fn module_exports_assignment(expr: &Expr) -> Option<&Expr> {
    let Expr::Assign(AssignExpr {
        op: AssignOp::Assign,
        left,
        right,
        ..
    }) = expr
    else {
        return None;
    };
    let AssignTarget::Simple(SimpleAssignTarget::Member(member)) = left else {
        return None;
    };
    let is_module = matches!(member.obj.as_ref(), Expr::Ident(obj) if obj.sym.as_str() == "module");
    (is_module && member_prop_name(&member.prop) == Some("exports")).then_some(right.as_ref())
}

/// A function that can be invoked with the context.
#[derive(Clone, Copy)]
enum Callable<'a> {
    Arrow(&'a ArrowExpr),
    Function(&'a Function),
}

/// A name bound in the module or a function body.
#[derive(Clone)]
enum Binding<'a> {
    Expr(&'a Expr),
    Function(&'a Function),
    Value(Value),
}

/// Static evaluation scope.
#[derive(Clone)]
struct Scope<'a> {
    bindings: HashMap<String, Binding<'a>>,
    context: Value,
    env: String,
}

impl<'a> Scope<'a> {
    fn new(ctx: &ConfigContext) -> Self {
        Self {
            bindings: HashMap::new(),
            context: ctx.to_value(),
            env: ctx.env.clone(),
        }
    }

    /// Records the bindings introduced by a declaration.
    fn declare(&mut self, decl: &'a Decl) {
        match decl {
            Decl::Var(var) => {
                for declarator in &var.decls {
                    self.declare_var(declarator);
                }
            }
            Decl::Fn(f) => {
                self.bindings
                    .insert(f.ident.sym.to_string(), Binding::Function(&f.function));
            }
            _ => {}
        }
    }

    fn declare_var(&mut self, declarator: &'a VarDeclarator) {
        if let (Pat::Ident(name), Some(init)) = (&declarator.name, &declarator.init) {
            self.bindings
                .insert(name.id.sym.to_string(), Binding::Expr(init.as_ref()));
        }
    }

    /// Returns the function an expression refers to, if it is one.
    fn callable(&self, expr: &'a Expr, depth: usize) -> Result<Option<Callable<'a>>, LoadError> {
        check_depth(depth)?;
        Ok(match unwrap_expr(expr) {
            Expr::Arrow(arrow) => Some(Callable::Arrow(arrow)),
            Expr::Fn(f) => Some(Callable::Function(&f.function)),
            Expr::Ident(ident) => match self.bindings.get(ident.sym.as_str()) {
                Some(Binding::Expr(bound)) => self.callable(*bound, depth + 1)?,
                Some(Binding::Function(function)) => Some(Callable::Function(*function)),
                _ => None,
            },
            _ => None,
        })
    }

    /// Invokes a function with the context as its first argument.
    fn invoke(&self, callable: Callable<'a>, depth: usize) -> Result<Value, LoadError> {
        check_depth(depth)?;
        let mut scope = self.clone();

        match callable {
            Callable::Arrow(arrow) => {
                if let Some(param) = arrow.params.first() {
                    scope.bind_context(param);
                }
                match arrow.body.as_ref() {
                    BlockStmtOrExpr::Expr(body) => scope.eval(body, depth + 1),
                    BlockStmtOrExpr::BlockStmt(block) => scope.eval_block(block, depth + 1),
                }
            }
            Callable::Function(function) => {
                if let Some(param) = function.params.first() {
                    scope.bind_context(&param.pat);
                }
                match &function.body {
                    Some(block) => scope.eval_block(block, depth + 1),
                    None => Ok(Value::Null),
                }
            }
        }
    }

    /// Binds the context to a parameter, plain or destructured.
    fn bind_context(&mut self, pat: &'a Pat) {
        match pat {
            Pat::Ident(name) => {
                self.bindings
                    .insert(name.id.sym.to_string(), Binding::Value(self.context.clone()));
            }
            Pat::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ObjectPatProp::Assign(assign) => {
                            let key = assign.key.id.sym.to_string();
                            let value = self.context.get(&key).cloned().unwrap_or(Value::Null);
                            self.bindings.insert(key, Binding::Value(value));
                        }
                        ObjectPatProp::KeyValue(kv) => {
                            let (Some(key), Pat::Ident(name)) =
                                (prop_name_str(&kv.key), kv.value.as_ref())
                            else {
                                continue;
                            };
                            let value = self.context.get(&key).cloned().unwrap_or(Value::Null);
                            self.bindings
                                .insert(name.id.sym.to_string(), Binding::Value(value));
                        }
                        ObjectPatProp::Rest(_) => {}
                    }
                }
            }
            _ => {}
        }
    }

    /// Evaluates a function body up to its first top-level `return`.
    fn eval_block(&mut self, block: &'a BlockStmt, depth: usize) -> Result<Value, LoadError> {
        for stmt in &block.stmts {
            match stmt {
                Stmt::Decl(decl) => self.declare(decl),
                Stmt::Return(ret) => {
                    return match &ret.arg {
                        Some(arg) => self.eval(arg, depth),
                        None => Ok(Value::Null),
                    };
                }
                _ => {}
            }
        }
        Ok(Value::Null)
    }

    /// Evaluates an expression to a JSON value.
    fn eval(&self, expr: &'a Expr, depth: usize) -> Result<Value, LoadError> {
        check_depth(depth)?;
        let depth = depth + 1;

        match unwrap_expr(expr) {
            Expr::Lit(lit) => eval_lit(lit),
            Expr::Tpl(tpl) => {
                let mut out = String::new();
                for (i, quasi) in tpl.quasis.iter().enumerate() {
                    out.push_str(quasi.raw.as_str());
                    if let Some(expr) = tpl.exprs.get(i) {
                        out.push_str(&to_display(&self.eval(expr, depth)?));
                    }
                }
                Ok(Value::String(out))
            }
            Expr::Array(array) => {
                let mut items = Vec::with_capacity(array.elems.len());
                for elem in &array.elems {
                    match elem {
                        Some(elem) if elem.spread.is_some() => match self.eval(&elem.expr, depth)? {
                            Value::Array(spread) => items.extend(spread),
                            _ => return Err(unsupported("a spread of a non-array")),
                        },
                        Some(elem) => items.push(self.eval(&elem.expr, depth)?),
                        None => items.push(Value::Null),
                    }
                }
                Ok(Value::Array(items))
            }
            Expr::Object(object) => {
                let mut map = Map::new();
                for prop in &object.props {
                    match prop {
                        PropOrSpread::Spread(spread) => match self.eval(&spread.expr, depth)? {
                            Value::Object(spread) => map.extend(spread),
                            Value::Null => {}
                            _ => return Err(unsupported("a spread of a non-object")),
                        },
                        PropOrSpread::Prop(prop) => match prop.as_ref() {
                            Prop::KeyValue(kv) => {
                                let key = prop_name_str(&kv.key)
                                    .ok_or_else(|| unsupported("a computed property key"))?;
                                map.insert(key, self.eval(&kv.value, depth)?);
                            }
                            Prop::Shorthand(ident) => {
                                let value = self.lookup(ident.sym.as_str(), depth)?;
                                map.insert(ident.sym.to_string(), value);
                            }
                            _ => return Err(unsupported("a method or accessor property")),
                        },
                    }
                }
                Ok(Value::Object(map))
            }
            Expr::Ident(ident) => self.lookup(ident.sym.as_str(), depth),
            Expr::Member(member) => self.eval_member(member, depth),
            Expr::Unary(unary) => {
                let arg = self.eval(&unary.arg, depth)?;
                match unary.op {
                    UnaryOp::Bang => Ok(Value::Bool(!is_truthy(&arg))),
                    UnaryOp::Minus => as_number(&arg)
                        .map(|n| number_value(-n))
                        .ok_or_else(|| unsupported("unary minus on a non-number")),
                    UnaryOp::Plus => as_number(&arg)
                        .map(number_value)
                        .ok_or_else(|| unsupported("unary plus on a non-number")),
                    _ => Err(unsupported("a unary operator")),
                }
            }
            Expr::Bin(bin) => {
                let left = self.eval(&bin.left, depth)?;
                match bin.op {
                    BinaryOp::LogicalAnd if !is_truthy(&left) => Ok(left),
                    BinaryOp::LogicalOr if is_truthy(&left) => Ok(left),
                    BinaryOp::NullishCoalescing if !left.is_null() => Ok(left),
                    BinaryOp::LogicalAnd | BinaryOp::LogicalOr | BinaryOp::NullishCoalescing => {
                        self.eval(&bin.right, depth)
                    }
                    BinaryOp::EqEqEq | BinaryOp::EqEq => {
                        Ok(Value::Bool(left == self.eval(&bin.right, depth)?))
                    }
                    BinaryOp::NotEqEq | BinaryOp::NotEq => {
                        Ok(Value::Bool(left != self.eval(&bin.right, depth)?))
                    }
                    BinaryOp::Add => {
                        let right = self.eval(&bin.right, depth)?;
                        match (as_number(&left), as_number(&right)) {
                            (Some(l), Some(r)) if !left.is_string() && !right.is_string() => {
                                Ok(number_value(l + r))
                            }
                            _ => Ok(Value::String(to_display(&left) + to_display(&right).as_str())),
                        }
                    }
                    _ => Err(unsupported("a binary operator")),
                }
            }
            Expr::Cond(cond) => {
                if is_truthy(&self.eval(&cond.test, depth)?) {
                    self.eval(&cond.cons, depth)
                } else {
                    self.eval(&cond.alt, depth)
                }
            }
            Expr::Call(call) => {
                let Callee::Expr(callee) = &call.callee else {
                    return Ok(Value::Null);
                };
                let wrapper = match unwrap_expr(callee) {
                    Expr::Ident(ident) => {
                        ident.sym.as_str() != "require"
                            && !self.bindings.contains_key(ident.sym.as_str())
                    }
                    _ => false,
                };
                match call.args.as_slice() {
                    [arg] if wrapper && arg.spread.is_none() => self.eval(&arg.expr, depth),
                    _ => Ok(Value::Null),
                }
            }
            Expr::New(_) => Ok(Value::Null),
            Expr::Arrow(_) | Expr::Fn(_) => {
                log::warn!("function-valued config entries cannot be evaluated and are ignored");
                Ok(Value::Null)
            }
            _ => Err(unsupported("this expression")),
        }
    }

    /// Resolves an identifier.
    fn lookup(&self, name: &str, depth: usize) -> Result<Value, LoadError> {
        match self.bindings.get(name) {
            Some(Binding::Expr(expr)) => self.eval(*expr, depth + 1),
            Some(Binding::Value(value)) => Ok(value.clone()),
            Some(Binding::Function(_)) => Ok(Value::Null),
            None if name == "undefined" => Ok(Value::Null),
            None => Err(LoadError::Unsupported(format!("unbound identifier `{name}`"))),
        }
    }

    /// Evaluates `obj.prop`, including `process.env.NAME`.
    fn eval_member(&self, member: &'a MemberExpr, depth: usize) -> Result<Value, LoadError> {
        let prop = match &member.prop {
            MemberProp::Computed(computed) => match self.eval(&computed.expr, depth)? {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => return Err(unsupported("a computed member key")),
            },
            other => member_prop_name(other)
                .ok_or_else(|| unsupported("a private member"))?
                .to_string(),
        };

        if let Expr::Member(inner) = unwrap_expr(&member.obj) {
            let is_process_env = matches!(inner.obj.as_ref(), Expr::Ident(obj) if obj.sym.as_str() == "process")
                && member_prop_name(&inner.prop) == Some("env");
            if is_process_env {
                if prop == "NODE_ENV" {
                    return Ok(Value::String(self.env.clone()));
                }
                return Ok(std::env::var(&prop).map(Value::String).unwrap_or(Value::Null));
            }
        }

        let object = self.eval(&member.obj, depth)?;
        Ok(match (&object, prop.parse::<usize>()) {
            (Value::Array(items), Ok(index)) => items.get(index).cloned().unwrap_or(Value::Null),
            _ => object.get(&prop).cloned().unwrap_or(Value::Null),
        })
    }
}

fn check_depth(depth: usize) -> Result<(), LoadError> {
    if depth > MAX_DEPTH {
        Err(unsupported("a self-referencing or too deeply nested value"))
    } else {
        Ok(())
    }
}

fn unsupported(what: &str) -> LoadError {
    LoadError::Unsupported(what.to_string())
}

/// Strips parentheses and TypeScript-only wrappers.
fn unwrap_expr(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(e) => unwrap_expr(&e.expr),
        Expr::TsAs(e) => unwrap_expr(&e.expr),
        Expr::TsSatisfies(e) => unwrap_expr(&e.expr),
        Expr::TsConstAssertion(e) => unwrap_expr(&e.expr),
        Expr::TsNonNull(e) => unwrap_expr(&e.expr),
        Expr::TsTypeAssertion(e) => unwrap_expr(&e.expr),
        _ => expr,
    }
}

fn eval_lit(lit: &Lit) -> Result<Value, LoadError> {
    match lit {
        Lit::Str(s) => s
            .value
            .as_str()
            .map(|s| Value::String(s.to_string()))
            .ok_or_else(|| unsupported("a string with lone surrogates")),
        Lit::Num(n) => Ok(number_value(n.value)),
        Lit::Bool(b) => Ok(Value::Bool(b.value)),
        Lit::Null(_) => Ok(Value::Null),
        Lit::Regex(re) => {
            let flags: String = re
                .flags
                .as_str()
                .chars()
                .filter(|c| matches!(c, 'i' | 'm' | 's'))
                .collect();
            let pattern = if flags.is_empty() {
                re.exp.to_string()
            } else {
                format!("(?{flags}){}", re.exp)
            };
            Ok(Value::String(pattern))
        }
        _ => Err(unsupported("this literal")),
    }
}

/// Converts a JS number, keeping integral values integral.
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        Value::from(n as i64)
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Stringifies a value the way template literals and `+` do.
fn to_display(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Gets a string value from a PropName.
fn prop_name_str(key: &PropName) -> Option<String> {
    match key {
        PropName::Ident(ident) => Some(ident.sym.to_string()),
        PropName::Str(s) => s.value.as_str().map(str::to_string),
        PropName::Num(n) => Some(n.value.to_string()),
        _ => None,
    }
}

/// Gets the name of a non-computed member property.
fn member_prop_name(prop: &MemberProp) -> Option<&str> {
    match prop {
        MemberProp::Ident(ident) => Some(ident.sym.as_str()),
        _ => None,
    }
}
