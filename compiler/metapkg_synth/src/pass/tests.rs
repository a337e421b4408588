use metapkg_ir::syntax::{Expr, Stmt, TypeExpr};
use metapkg_ir::{
    BasicKind, FuncMember, Member, MemberDescriptor, MethodDecl, Package, ParamDescriptor,
    Signature, TypeMember, TypeShape, TypedProgram, UnitRef,
};
use pretty_assertions::assert_eq;

use super::*;
use crate::members_of;

const TARGET: &str = "example.com/calc";

fn calc() -> UnitRef {
    UnitRef::new(TARGET, "calc")
}

fn int() -> TypeShape {
    TypeShape::basic(BasicKind::Int)
}

fn param(name: &str, ty: TypeShape) -> ParamDescriptor {
    ParamDescriptor::new(name, TARGET, ty)
}

fn add() -> MemberDescriptor {
    MemberDescriptor::function(
        calc(),
        "Add",
        &Signature::new(vec![param("a", int()), param("b", int())], vec![param("", int())]),
    )
}

fn inc(parent: &str) -> MemberDescriptor {
    MemberDescriptor::method(
        calc(),
        "Inc",
        ParamDescriptor::receiver("c", &calc(), parent, true),
        &Signature::default(),
    )
}

fn apply(result: TypeShape) -> MemberDescriptor {
    let callback = Signature::new(vec![param("", int())], vec![param("", result)]);
    MemberDescriptor::function(
        calc(),
        "Apply",
        &Signature::new(
            vec![param("f", TypeShape::signature(callback))],
            vec![param("", int())],
        ),
    )
}

fn func_names(harness: &Harness) -> Vec<&str> {
    harness
        .program
        .funcs
        .iter()
        .map(|f| f.name.as_str())
        .collect()
}

fn main_calls(harness: &Harness) -> Vec<Stmt> {
    harness.program.funcs.last().unwrap().body.clone()
}

fn call(name: &str) -> Stmt {
    Stmt::Expr(Expr::call(Expr::ident(name), Vec::new()))
}

#[test]
fn function_and_method_each_get_one_wrapper() {
    let harness = synthesize_harness(&[add(), inc("Counter")]).unwrap();

    assert_eq!(
        func_names(&harness),
        vec!["example_com_calc_Add", "example_com_calc_Counter_Inc", "main"]
    );
    assert_eq!(
        main_calls(&harness),
        vec![
            call("example_com_calc_Add"),
            call("example_com_calc_Counter_Inc")
        ]
    );
    assert_eq!(harness.summary.wrappers, 2);
    assert_eq!(harness.summary.closures, 0);
    assert_eq!(harness.program.imports.len(), 1);
    assert_eq!(harness.program.imports[0].path, TARGET);
}

#[test]
fn function_parameter_becomes_one_closure() {
    let harness = synthesize_harness(&[apply(int())]).unwrap();

    assert_eq!(
        func_names(&harness),
        vec!["example_com_calc_Apply", "closure0", "main"]
    );
    let closure = &harness.program.funcs[1];
    assert_eq!(
        closure.body,
        vec![
            Stmt::Var {
                name: "v0".to_string(),
                ty: TypeExpr::Ident("int".to_string()),
            },
            Stmt::Return(vec![Expr::ident("v0")]),
        ]
    );
    assert_eq!(closure.results.len(), 1);
    assert_eq!(harness.summary.closures, 1);
}

#[test]
fn only_unexported_members_yields_an_empty_entry_point() {
    let program = TypedProgram {
        packages: vec![Package {
            path: TARGET.to_string(),
            name: "calc".to_string(),
            errors: Vec::new(),
            members: vec![Member::Func(FuncMember {
                name: "helper".to_string(),
                type_params: Vec::new(),
                signature: Signature::default(),
            })],
        }],
    };
    let members = members_of(&program, TARGET).unwrap();
    let harness = synthesize_harness(&members).unwrap();

    assert_eq!(func_names(&harness), vec!["main"]);
    assert!(main_calls(&harness).is_empty());
    assert!(harness.program.imports.is_empty());
    assert_eq!(harness.summary, RunSummary::default());
}

#[test]
fn failing_closure_skips_its_member_only() {
    let bad = apply(TypeShape::pointer(TypeShape::slice(int())));
    let harness = synthesize_harness(&[bad, add()]).unwrap();

    assert_eq!(func_names(&harness), vec!["example_com_calc_Add", "main"]);
    assert_eq!(harness.summary.wrappers, 1);
    assert_eq!(harness.summary.closures, 0);
    assert_eq!(
        harness.summary.skipped,
        vec![SkippedMember {
            member: "calc.Apply".to_string(),
            reason: SynthError::TypeResolution {
                shape: "pointer to slice".to_string(),
            },
        }]
    );
}

#[test]
fn unsupported_parameter_skips_the_member() {
    let member = MemberDescriptor::function(
        calc(),
        "Deref",
        &Signature::new(
            vec![param("pp", TypeShape::pointer(TypeShape::pointer(int())))],
            Vec::new(),
        ),
    );
    let harness = synthesize_harness(&[member]).unwrap();
    assert_eq!(func_names(&harness), vec!["main"]);
    assert_eq!(harness.summary.skipped.len(), 1);
    assert_eq!(harness.summary.skipped[0].member, "calc.Deref");
}

#[test]
fn generic_members_are_skipped() {
    let returns_int = Signature::new(Vec::new(), vec![param("", int())]);
    let program = TypedProgram {
        packages: vec![Package {
            path: TARGET.to_string(),
            name: "calc".to_string(),
            errors: Vec::new(),
            members: vec![
                Member::Func(FuncMember {
                    name: "New".to_string(),
                    type_params: vec!["T".to_string()],
                    signature: returns_int.clone(),
                }),
                Member::Type(TypeMember {
                    name: "List".to_string(),
                    type_params: vec!["T".to_string()],
                    underlying: Some(TypeShape::empty_struct()),
                    methods: vec![MethodDecl {
                        name: "Len".to_string(),
                        receiver_name: "l".to_string(),
                        pointer_receiver: true,
                        signature: returns_int,
                    }],
                    embedded: Vec::new(),
                }),
                Member::Func(FuncMember {
                    name: "Reset".to_string(),
                    type_params: Vec::new(),
                    signature: Signature::default(),
                }),
            ],
        }],
    };
    let members = members_of(&program, TARGET).unwrap();
    let harness = synthesize_harness(&members).unwrap();

    assert_eq!(func_names(&harness), vec!["example_com_calc_Reset", "main"]);
    assert_eq!(
        harness.summary.skipped,
        vec![
            SkippedMember {
                member: "calc.New".to_string(),
                reason: SynthError::unsupported("generic function", "New"),
            },
            SkippedMember {
                member: "calc.List.Len".to_string(),
                reason: SynthError::unsupported("method of generic type", "Len"),
            },
        ]
    );
}

#[test]
fn unexported_parameter_types_skip_the_member() {
    let member = MemberDescriptor::function(
        calc(),
        "Open",
        &Signature::new(
            vec![param("s", TypeShape::named(Some(calc()), "secret"))],
            Vec::new(),
        ),
    );
    let harness = synthesize_harness(&[member, add()]).unwrap();

    assert_eq!(func_names(&harness), vec!["example_com_calc_Add", "main"]);
    assert_eq!(
        harness.summary.skipped,
        vec![SkippedMember {
            member: "calc.Open".to_string(),
            reason: SynthError::unsupported("unexported type calc.secret", "s"),
        }]
    );
}

#[test]
fn private_receivers_and_reserved_names_are_excluded() {
    let init = MemberDescriptor::function(calc(), "init", &Signature::default());
    let harness = synthesize_harness(&[inc("counter"), init]).unwrap();

    assert_eq!(func_names(&harness), vec!["main"]);
    assert!(harness.summary.skipped.is_empty());
    assert_eq!(
        harness.summary.excluded,
        vec![
            ExcludedMember {
                member: "calc.counter.Inc".to_string(),
                reason: Exclusion::PrivateReceiverType("counter".to_string()),
            },
            ExcludedMember {
                member: "calc.init".to_string(),
                reason: Exclusion::ReservedName("init".to_string()),
            },
        ]
    );
}

#[test]
fn colliding_wrapper_names_are_disambiguated() {
    let lookalike = MemberDescriptor::function(calc(), "Counter_Inc", &Signature::default());
    let harness = synthesize_harness(&[inc("Counter"), lookalike]).unwrap();

    assert_eq!(
        func_names(&harness),
        vec![
            "example_com_calc_Counter_Inc",
            "example_com_calc_Counter_Inc_2",
            "main"
        ]
    );
    assert_eq!(
        harness.summary.renamed,
        vec![Rename {
            original: "example_com_calc_Counter_Inc".to_string(),
            assigned: "example_com_calc_Counter_Inc_2".to_string(),
        }]
    );
}

#[test]
fn closures_follow_wrapper_order() {
    let harness = synthesize_harness(&[apply(int()), add(), apply(TypeShape::basic(BasicKind::String))])
        .unwrap();
    assert_eq!(
        func_names(&harness),
        vec![
            "example_com_calc_Apply",
            "example_com_calc_Add",
            "example_com_calc_Apply_2",
            "closure0",
            "closure1",
            "main"
        ]
    );
}

#[test]
fn synthesis_is_deterministic() {
    let members = [apply(int()), add(), inc("Counter")];
    assert_eq!(
        synthesize_harness(&members).unwrap(),
        synthesize_harness(&members).unwrap()
    );
}
