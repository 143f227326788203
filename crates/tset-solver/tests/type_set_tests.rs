//! Tests for type-set resolution: memoization, cycles, method merging,
//! version gates, and constraint intersection.

use crate::ast::TypeExpr;
use crate::checker::TypeDecl;
use crate::store::TypeStore;
use crate::test_utils::*;
use crate::type_set::TypeSetError;
use crate::types::{Constraint, TypeId, TypeSetId};
use tset_common::diagnostics::diagnostic_codes;
use tset_common::{GoVersion, Pos};

const GO1_13: GoVersion = GoVersion::new(1, 13);
const GO1_17: GoVersion = GoVersion::new(1, 17);

// =============================================================================
// Basic Resolution
// =============================================================================

#[test]
fn test_empty_interface_is_top() {
    let (store, unit) = check(vec![iface_decl("E", 0, vec![])]);
    assert!(unit.diagnostics.is_empty());
    assert_eq!(declared_tset(&store, &unit, "E"), TypeSetId::TOP);

    let mut store = TypeStore::new();
    let (_, iface) = new_iface(&mut store, vec![], vec![]);
    assert_eq!(store.resolve_type_set(iface), Ok(TypeSetId::TOP));
}

#[test]
fn test_embedding_adds_methods() {
    // type A interface{ M() }
    // type B interface{ A; N() }
    let (store, unit) = check(vec![
        iface_decl("A", 0, vec![method0("M", 20)]),
        iface_decl("B", 40, vec![embed(name(60, "A")), method0("N", 70)]),
    ]);
    assert!(unit.diagnostics.is_empty(), "{:?}", unit.diagnostics);
    let tset = declared_tset(&store, &unit, "B");
    assert_eq!(method_names(&store, tset), ["M", "N"]);
    assert_eq!(store.type_set(tset).constraint(), Constraint::All);
    assert!(store.type_set(tset).is_finalized());
}

#[test]
fn test_methods_are_sorted_without_duplicates() {
    let (store, unit) = check(vec![iface_decl(
        "I",
        0,
        vec![method0("c", 10), method0("A", 20), method0("b", 30)],
    )]);
    assert!(unit.diagnostics.is_empty());
    let tset = declared_tset(&store, &unit, "I");
    assert_eq!(method_names(&store, tset), ["A", "b", "c"]);
}

#[test]
fn test_declaration_order_does_not_matter() {
    let (store, unit) = check(vec![
        iface_decl("X", 0, vec![method0("B", 10), method0("A", 20), method0("C", 30)]),
        iface_decl("Y", 100, vec![method0("C", 110), method0("B", 120), method0("A", 130)]),
    ]);
    let x = declared_tset(&store, &unit, "X");
    let y = declared_tset(&store, &unit, "Y");
    assert_eq!(method_names(&store, x), method_names(&store, y));
    let (x_ty, y_ty) = (unit.lookup(&store, "X").unwrap(), unit.lookup(&store, "Y").unwrap());
    assert!(!crate::identical(&store, x_ty, y_ty), "named types stay distinct");
    assert!(
        crate::identical(&store, store.under(x_ty), store.under(y_ty)),
        "underlying interfaces have identical type sets"
    );
}

#[test]
fn test_forward_reference_resolves() {
    // B is declared before the interface it embeds.
    let (store, unit) = check(vec![
        iface_decl("B", 0, vec![embed(name(20, "A"))]),
        iface_decl("A", 40, vec![method0("M", 60)]),
    ]);
    assert!(unit.diagnostics.is_empty(), "{:?}", unit.diagnostics);
    let tset = declared_tset(&store, &unit, "B");
    assert_eq!(method_names(&store, tset), ["M"]);
}

#[test]
fn test_type_set_is_memoized() {
    let mut store = TypeStore::new();
    let s = sig(&mut store, &[], &[]);
    let m = new_method(&mut store, "M", s, 0);
    let (_, iface) = new_iface(&mut store, vec![m], vec![]);
    let first = store.resolve_type_set(iface).unwrap();
    let second = store.resolve_type_set(iface).unwrap();
    assert_eq!(first, second);
    assert_eq!(store.interface(iface).tset, Some(first));
}

#[test]
fn test_incomplete_interface_is_not_cached() {
    let mut store = TypeStore::new();
    let (_, iface) = store.new_interface();
    assert_eq!(store.resolve_type_set(iface), Ok(TypeSetId::TOP));
    assert_eq!(store.interface(iface).tset, None, "partial result must not be stored");
}

// =============================================================================
// Cycles
// =============================================================================

#[test]
fn test_self_embedding_terminates() {
    // type I interface{ I }
    let (store, unit) = check(vec![iface_decl("I", 0, vec![embed(name(20, "I"))])]);
    let tset = declared_tset(&store, &unit, "I");
    assert_eq!(store.type_set(tset).num_methods(), 0);
    assert_eq!(store.type_set(tset).constraint(), Constraint::All);
}

#[test]
fn test_self_embedding_without_checker() {
    let mut store = TypeStore::new();
    let atom = store.intern("I");
    let pkg = store.intern("p");
    let named = store.named_type(atom, pkg);
    let (ty, iface) = new_iface(&mut store, vec![], vec![named]);
    store.set_underlying(named, ty);
    let tset = store.resolve_type_set(iface).unwrap();
    assert!(store.type_set(tset).is_all());
    assert!(store.type_set(tset).is_finalized());
}

#[test]
fn test_mutual_embedding_keeps_own_methods() {
    // type A interface{ B; M() }
    // type B interface{ A; N() }
    let (store, unit) = check(vec![
        iface_decl("A", 0, vec![embed(name(10, "B")), method0("M", 20)]),
        iface_decl("B", 40, vec![embed(name(50, "A")), method0("N", 60)]),
    ]);
    assert!(unit.diagnostics.is_empty(), "{:?}", unit.diagnostics);
    // A is resolved first; it sees B's complete method list, while B sees
    // A's placeholder.
    let a = declared_tset(&store, &unit, "A");
    let b = declared_tset(&store, &unit, "B");
    assert_eq!(method_names(&store, a), ["M", "N"]);
    assert_eq!(method_names(&store, b), ["N"]);
}

// =============================================================================
// Method Merging
// =============================================================================

#[test]
fn test_diamond_embedding_keeps_one_identical_method() {
    // I{M}; J{I}; K{I; J}
    let mut store = TypeStore::new();
    let s = sig(&mut store, &[], &[]);
    let m = new_method(&mut store, "M", s, 0);
    let (i_ty, _) = new_iface(&mut store, vec![m], vec![]);
    let (j_ty, _) = new_iface(&mut store, vec![], vec![i_ty]);
    let (_, k) = new_iface(&mut store, vec![], vec![i_ty, j_ty]);
    let methods = store.all_methods(k).unwrap();
    assert_eq!(methods, vec![m], "same method object, exactly once");
}

#[test]
fn test_diamond_embedding_never_errors() {
    for version in [GO1_13, GoVersion::GO1_14, GoVersion::LATEST] {
        let (store, unit) = check_with(
            vec![
                iface_decl("I", 0, vec![method0("M", 10)]),
                iface_decl("J", 20, vec![embed(name(30, "I"))]),
                iface_decl("K", 40, vec![embed(name(50, "I")), embed(name(60, "J"))]),
            ],
            version,
        );
        assert!(unit.diagnostics.is_empty(), "{version}: {:?}", unit.diagnostics);
        let i = declared_tset(&store, &unit, "I");
        let k = declared_tset(&store, &unit, "K");
        assert_eq!(store.type_set(k).methods(), store.type_set(i).methods());
    }
}

#[test]
fn test_identical_overlap_allowed_from_go1_14() {
    // type A interface{ M() }
    // type B interface{ M() }
    // type C interface{ A; B }
    let decls = || {
        vec![
            iface_decl("A", 0, vec![method0("M", 10)]),
            iface_decl("B", 20, vec![method0("M", 30)]),
            iface_decl("C", 40, vec![embed(name(50, "A")), embed(name(60, "B"))]),
        ]
    };
    let (store, unit) = check_with(decls(), GoVersion::GO1_14);
    assert!(unit.diagnostics.is_empty(), "{:?}", unit.diagnostics);
    let a = declared_tset(&store, &unit, "A");
    let c = declared_tset(&store, &unit, "C");
    assert_eq!(
        store.type_set(c).methods(),
        store.type_set(a).methods(),
        "first embedding wins"
    );

    let (_, unit) = check_with(decls(), GO1_13);
    assert_eq!(codes(&unit.diagnostics), [diagnostic_codes::DUPLICATE_METHOD]);
}

#[test]
fn test_conflicting_embedded_methods_always_error() {
    // type A interface{ M() }
    // type B interface{ M(int) }
    // type C interface{ A; B }
    for version in [GO1_13, GoVersion::LATEST] {
        let (store, unit) = check_with(
            vec![
                iface_decl("A", 0, vec![method0("M", 10)]),
                iface_decl("B", 20, vec![method("M", 30, func(31, vec![name(32, "int")], vec![]))]),
                iface_decl("C", 40, vec![embed(name(50, "A")), embed(name(60, "B"))]),
            ],
            version,
        );
        assert_eq!(unit.diagnostics.len(), 1, "{version}: {:?}", unit.diagnostics);
        let d = &unit.diagnostics[0];
        assert_eq!(d.code, diagnostic_codes::DUPLICATE_METHOD);
        assert_eq!(d.message_text, "duplicate method M");
        assert_eq!(d.start, p(60), "reported at the second embedding");
        assert_eq!(d.related_information.len(), 1);
        assert_eq!(d.related_information[0].start, p(50));
        assert_eq!(d.related_information[0].message_text, "other declaration of M");

        let c = declared_tset(&store, &unit, "C");
        assert_eq!(method_names(&store, c), ["M"], "best-effort result");
    }
}

#[test]
fn test_explicit_method_shadows_embedded() {
    // type A interface{ M() }
    // type B interface{ A; M(int) }
    let (store, unit) = check(vec![
        iface_decl("A", 0, vec![method0("M", 10)]),
        iface_decl(
            "B",
            20,
            vec![embed(name(30, "A")), method("M", 40, func(41, vec![name(42, "int")], vec![]))],
        ),
    ]);
    assert!(unit.diagnostics.is_empty(), "{:?}", unit.diagnostics);
    let b_iface = declared_iface(&store, &unit, "B");
    let explicit = store.interface(b_iface).methods[0];
    let b = declared_tset(&store, &unit, "B");
    assert_eq!(store.type_set(b).methods(), [explicit]);
}

#[test]
fn test_duplicate_explicit_method() {
    let (store, unit) = check(vec![iface_decl("I", 0, vec![method0("M", 10), method0("M", 20)])]);
    assert_eq!(unit.diagnostics.len(), 1);
    let d = &unit.diagnostics[0];
    assert_eq!(d.code, diagnostic_codes::DUPLICATE_METHOD);
    assert_eq!(d.start, p(20));
    assert_eq!(d.related_information[0].start, p(10));
    let tset = declared_tset(&store, &unit, "I");
    assert_eq!(method_names(&store, tset), ["M"]);
}

#[test]
fn test_unexported_methods_are_scoped_to_their_package() {
    let mut store = TypeStore::new();
    let s = sig(&mut store, &[], &[]);
    let name = store.intern("m");
    let pkg_a = store.intern("a");
    let pkg_b = store.intern("b");
    let ma = store.new_method(name, pkg_a, s, TypeId::INVALID, Pos::NONE);
    let mb = store.new_method(name, pkg_b, s, TypeId::INVALID, Pos::NONE);
    let (a, _) = new_iface(&mut store, vec![ma], vec![]);
    let (b, _) = new_iface(&mut store, vec![mb], vec![]);
    let (_, c) = new_iface(&mut store, vec![], vec![a, b]);
    let methods = store.all_methods(c).unwrap();
    assert_eq!(methods, vec![ma, mb], "sorted by package path");
}

// =============================================================================
// Resolution Without a Checker
// =============================================================================

#[test]
fn test_explicit_duplicate_fails_without_checker() {
    let mut store = TypeStore::new();
    let s = sig(&mut store, &[], &[]);
    let m1 = new_method(&mut store, "M", s, 10);
    let m2 = new_method(&mut store, "M", s, 20);
    let (_, iface) = new_iface(&mut store, vec![m1, m2], vec![]);
    let err = store.resolve_type_set(iface).unwrap_err();
    let TypeSetError::DuplicateMethod { name, .. } = &err;
    assert_eq!(name, "M");
    assert_eq!(store.interface(iface).tset, None, "slot rolled back");
}

#[test]
fn test_conflicting_embeddings_fail_without_checker() {
    let mut store = TypeStore::new();
    let s0 = sig(&mut store, &[], &[]);
    let s1 = sig(&mut store, &[TypeId::INT], &[]);
    let m1 = new_method(&mut store, "M", s0, 10);
    let m2 = new_method(&mut store, "M", s1, 20);
    let (a, a_iface) = new_iface(&mut store, vec![m1], vec![]);
    let (b, _) = new_iface(&mut store, vec![m2], vec![]);
    let (c, c_iface) = new_iface(&mut store, vec![], vec![a, b]);
    let (_, d_iface) = new_iface(&mut store, vec![], vec![c]);

    let err = store.resolve_type_set(d_iface).unwrap_err();
    assert_eq!(
        err,
        TypeSetError::DuplicateMethod {
            name: "M".to_string(),
            pos: p(20),
            other: p(10),
        }
    );
    assert_eq!(err.to_string(), "@20: duplicate method M");
    assert_eq!(store.interface(c_iface).tset, None);
    assert_eq!(store.interface(d_iface).tset, None);
    assert!(store.interface(a_iface).tset.is_some(), "completed sets are kept");
}

#[test]
fn test_identical_embeddings_succeed_without_checker() {
    let mut store = TypeStore::new();
    let s0 = sig(&mut store, &[TypeId::STRING], &[TypeId::INT]);
    let s1 = sig(&mut store, &[TypeId::STRING], &[TypeId::INT]);
    let m1 = new_method(&mut store, "M", s0, 10);
    let m2 = new_method(&mut store, "M", s1, 20);
    let (a, _) = new_iface(&mut store, vec![m1], vec![]);
    let (b, _) = new_iface(&mut store, vec![m2], vec![]);
    let (_, c) = new_iface(&mut store, vec![], vec![a, b]);
    assert_eq!(store.all_methods(c).unwrap().len(), 1);
}

// =============================================================================
// Embedded Elements and Version Gates
// =============================================================================

#[test]
fn test_embedded_type_parameter_gate() {
    let decls = || {
        vec![
            TypeDecl::type_param("T", p(0), None),
            iface_decl("I", 10, vec![embed(name(20, "T"))]),
        ]
    };
    let (_, unit) = check_with(decls(), GO1_17);
    assert_eq!(codes(&unit.diagnostics), [diagnostic_codes::EMBEDDED_TYPE_PARAMETER]);
    assert_eq!(unit.diagnostics[0].message_text, "T is a type parameter, not an interface");
    assert_eq!(unit.diagnostics[0].start, p(20));

    let (store, unit) = check_with(decls(), GoVersion::GO1_18);
    assert!(unit.diagnostics.is_empty(), "{:?}", unit.diagnostics);
    let t = unit.lookup(&store, "T").unwrap();
    let tset = declared_tset(&store, &unit, "I");
    assert_eq!(store.type_set(tset).constraint(), Constraint::TypeParam(t));
    assert_eq!(store.type_set(tset).constraint().includes(&store, TypeId::INT), None);
}

#[test]
fn test_embedded_non_interface_gate() {
    let decls = || vec![iface_decl("I", 0, vec![embed(name(10, "int"))])];
    let (_, unit) = check_with(decls(), GO1_17);
    assert_eq!(codes(&unit.diagnostics), [diagnostic_codes::EMBEDDED_NOT_AN_INTERFACE]);
    assert_eq!(unit.diagnostics[0].message_text, "int is not an interface");

    let (store, unit) = check_with(decls(), GoVersion::GO1_18);
    assert!(unit.diagnostics.is_empty());
    let c = store.type_set(declared_tset(&store, &unit, "I")).constraint();
    assert_eq!(c.includes(&store, TypeId::INT), Some(true));
    assert_eq!(c.includes(&store, TypeId::INT64), Some(false));
}

#[test]
fn test_invalid_embedding_is_skipped() {
    let (store, unit) = check(vec![iface_decl("I", 0, vec![embed(name(10, "Missing")), method0("M", 20)])]);
    assert_eq!(codes(&unit.diagnostics), [diagnostic_codes::UNDECLARED_NAME]);
    let tset = declared_tset(&store, &unit, "I");
    assert_eq!(method_names(&store, tset), ["M"]);
    assert_eq!(store.type_set(tset).constraint(), Constraint::All);
}

// =============================================================================
// Constraint Intersection
// =============================================================================

#[test]
fn test_nested_union_intersection() {
    // type MyInt int
    // type C interface{ ~int | ~float64 }
    // type D interface{ C; ~int }
    let (store, unit) = check(vec![
        TypeDecl::type_decl("MyInt", p(0), name(10, "int")),
        iface_decl(
            "C",
            20,
            vec![embed(TypeExpr::or(
                TypeExpr::tilde(p(30), name(31, "int")),
                TypeExpr::tilde(p(37), name(38, "float64")),
            ))],
        ),
        iface_decl(
            "D",
            60,
            vec![embed(name(70, "C")), embed(TypeExpr::tilde(p(80), name(81, "int")))],
        ),
    ]);
    assert!(unit.diagnostics.is_empty(), "{:?}", unit.diagnostics);
    let my_int = unit.lookup(&store, "MyInt").unwrap();
    let c = store.type_set(declared_tset(&store, &unit, "D")).constraint();
    assert_eq!(c.includes(&store, TypeId::INT), Some(true));
    assert_eq!(c.includes(&store, my_int), Some(true));
    assert_eq!(c.includes(&store, TypeId::FLOAT64), Some(false));
    assert_eq!(c.includes(&store, TypeId::STRING), Some(false));
}

#[test]
fn test_disjoint_unions_give_empty_type_set() {
    // type I interface{ int; string }
    let (store, unit) = check(vec![iface_decl(
        "I",
        0,
        vec![embed(name(10, "int")), embed(name(20, "string"))],
    )]);
    assert!(unit.diagnostics.is_empty());
    let tset = store.type_set(declared_tset(&store, &unit, "I"));
    assert!(tset.is_empty(&store));
    assert!(!tset.is_all());
}

#[test]
fn test_lookup_method() {
    let (store, unit) = check(vec![iface_decl("I", 0, vec![method0("Read", 10), method0("Close", 20)])]);
    let tset = store.type_set(declared_tset(&store, &unit, "I"));
    let read = tset.lookup_method(&store, "Read").expect("Read is declared");
    assert_eq!(store.method(read).pos, p(10));
    assert!(tset.lookup_method(&store, "Write").is_none());
}

// =============================================================================
// Interfaces Inside Method Signatures
// =============================================================================

/// `interface{ N() <results> }` built without a checker.
fn literal_with_n(store: &mut TypeStore, results: &[TypeId]) -> TypeId {
    let n_sig = sig(store, &[], results);
    let n = new_method(store, "N", n_sig, 0);
    new_iface(store, vec![n], vec![]).0
}

#[test]
fn test_identical_signatures_with_interface_params_merge_without_checker() {
    // A{ M(interface{ N() }) }, B{ M(interface{ N() }) }, C{ A; B }
    let mut store = TypeStore::new();
    let l1 = literal_with_n(&mut store, &[]);
    let l2 = literal_with_n(&mut store, &[]);
    let sig_a = sig(&mut store, &[l1], &[]);
    let sig_b = sig(&mut store, &[l2], &[]);
    let ma = new_method(&mut store, "M", sig_a, 10);
    let mb = new_method(&mut store, "M", sig_b, 20);
    let (a, _) = new_iface(&mut store, vec![ma], vec![]);
    let (b, _) = new_iface(&mut store, vec![mb], vec![]);
    let (_, c) = new_iface(&mut store, vec![], vec![a, b]);

    let methods = store.all_methods(c).expect("identical signatures merge");
    assert_eq!(methods.len(), 1);
    assert_eq!(store.method_name(methods[0]), "M");
}

#[test]
fn test_differing_interface_params_conflict_without_checker() {
    // A{ M(interface{ N() }) }, B{ M(interface{ N() int }) }, C{ A; B }
    let mut store = TypeStore::new();
    let l1 = literal_with_n(&mut store, &[]);
    let l2 = literal_with_n(&mut store, &[TypeId::INT]);
    let sig_a = sig(&mut store, &[l1], &[]);
    let sig_b = sig(&mut store, &[l2], &[]);
    let ma = new_method(&mut store, "M", sig_a, 10);
    let mb = new_method(&mut store, "M", sig_b, 20);
    let (a, _) = new_iface(&mut store, vec![ma], vec![]);
    let (b, _) = new_iface(&mut store, vec![mb], vec![]);
    let (_, c) = new_iface(&mut store, vec![], vec![a, b]);

    assert!(matches!(
        store.all_methods(c),
        Err(TypeSetError::DuplicateMethod { .. })
    ));
}

#[test]
fn test_identical_signatures_with_interface_params_merge_with_checker() {
    // type A interface{ M(interface{ N() }) }
    // type B interface{ M(interface{ N() }) }
    // type C interface{ A; B }
    let param = |pos: u32| TypeExpr::interface(p(pos), vec![method0("N", pos + 10)]);
    let (store, unit) = check_with(
        vec![
            iface_decl("A", 0, vec![method("M", 10, func(11, vec![param(12)], vec![]))]),
            iface_decl("B", 40, vec![method("M", 50, func(51, vec![param(52)], vec![]))]),
            iface_decl("C", 80, vec![embed(name(90, "A")), embed(name(93, "B"))]),
        ],
        GoVersion::LATEST,
    );
    assert!(unit.diagnostics.is_empty(), "{:?}", unit.diagnostics);
    assert_eq!(method_names(&store, declared_tset(&store, &unit, "C")), ["M"]);
}

// =============================================================================
// Accessors
// =============================================================================

#[test]
fn test_is_unrestricted() {
    let mut store = TypeStore::new();
    let (empty_ty, empty) = new_iface(&mut store, vec![], vec![]);
    assert_eq!(store.is_unrestricted(empty), Ok(true));

    let (_, wraps_empty) = new_iface(&mut store, vec![], vec![empty_ty]);
    assert_eq!(store.is_unrestricted(wraps_empty), Ok(true));

    let s = sig(&mut store, &[], &[]);
    let m = new_method(&mut store, "M", s, 0);
    let (_, with_method) = new_iface(&mut store, vec![m], vec![]);
    assert_eq!(store.is_unrestricted(with_method), Ok(false));

    let ints = store.union_type(vec![crate::types::Term::approximate(TypeId::INT)]);
    let (_, constrained) = new_iface(&mut store, vec![], vec![ints]);
    assert_eq!(store.is_unrestricted(constrained), Ok(false));
}

#[test]
fn test_explicit_and_embedded_counts() {
    // type A interface{ M() }
    // type I interface{ A; ~int; N() }
    let (store, unit) = check(vec![
        iface_decl("A", 0, vec![method0("M", 10)]),
        iface_decl(
            "I",
            20,
            vec![
                embed(name(30, "A")),
                embed(TypeExpr::tilde(p(33), name(34, "int"))),
                method0("N", 40),
            ],
        ),
    ]);
    assert!(unit.diagnostics.is_empty(), "{:?}", unit.diagnostics);
    let iface = store.interface(declared_iface(&store, &unit, "I"));
    assert_eq!(iface.num_embeddeds(), 2);
    assert_eq!(iface.num_explicit_methods(), 1);
    assert_eq!(store.type_set(declared_tset(&store, &unit, "I")).num_methods(), 2);
}
