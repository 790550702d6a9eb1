use std::{collections::HashMap, sync::Arc};

use lazy_static::lazy_static;
use veloxc_arena::{Map, ID};
use veloxc_handler::{Panic, Storage};
use veloxc_ir::{
    instruction::{FunctionCall, IndirectCall, Pure, TraitCall},
    Bodies, Body,
};
use veloxc_source_file::{SourceFile, Span};
use veloxc_symbol::{
    bound::{TraitBound, WhereClause},
    constness::{ConstnessClass, Obligation},
    diagnostic::Diagnostic,
    generic_parameter::{GenericParameters, TypeParameter, TypeParameterRef},
    instantiation::Instantiation,
    ty::{Symbol, Type},
    CallableRef, Function, GenericItemRef, Implements, ImplementsFunctionRef,
    ImplementsRef, Struct, Table, Trait, TraitFunction,
};

use crate::{
    annotate::Assumptions,
    call_site::{check_instantiation, Evaluation},
    check::check,
    diagnostic::{
        ConstResolutionOverflow, IndirectCallInConstContext,
        NonConstDropField, NonConstFunctionCall, NonConstTraitCall,
        OptOutBoundCall, OptOutBoundInConstImplements,
        UnsatisfiedConstObligation,
    },
    function::check_function,
    implementation::check_implements,
    registry::Registry,
};

lazy_static! {
    static ref SOURCE: Arc<SourceFile> =
        SourceFile::new("const test input".to_string(), "test".into());
}

fn test_span() -> Span { Span::new(SOURCE.clone(), 0, 5) }

fn type_parameter(name: &str) -> TypeParameter {
    TypeParameter { name: name.to_string(), span: None }
}

/// Computes the reference the next implementation inserted into the trait
/// will get.
fn next_implements_ref(table: &Table, trait_id: ID<Trait>) -> ImplementsRef {
    ImplementsRef::new(
        trait_id,
        ID::new(table.traits().get(trait_id).unwrap().implements.len()),
    )
}

/// Computes the ID the next inserted function will get.
fn next_function_id(table: &Table) -> ID<Function> {
    ID::new(table.functions().len())
}

struct Fixture {
    table: Table,
    bodies: Bodies,

    add_trait: ID<Trait>,
    add_function: ID<TraitFunction>,
    drop_trait: ID<Trait>,

    point: ID<Struct>,
    text: ID<Struct>,
    wrap: ID<Struct>,

    wrap_implements: ImplementsRef,
    wrap_parameter: TypeParameterRef,
}

impl Fixture {
    fn point_type(&self) -> Type {
        Type::Symbol(Symbol { struct_id: self.point, type_arguments: vec![] })
    }

    fn text_type(&self) -> Type {
        Type::Symbol(Symbol { struct_id: self.text, type_arguments: vec![] })
    }

    fn wrap_of(&self, inner: Type) -> Type {
        Type::Symbol(Symbol {
            struct_id: self.wrap,
            type_arguments: vec![inner],
        })
    }

    /// Inserts a `const function` with a single `T` parameter, the given
    /// bound markers, and the given body.
    fn insert_const_function(
        &mut self,
        name: &str,
        bound: Option<(ID<Trait>, bool)>,
        body_of: impl FnOnce(TypeParameterRef) -> Body,
    ) -> (ID<Function>, TypeParameterRef) {
        let function_id = next_function_id(&self.table);

        let mut generic_parameters = GenericParameters::default();
        let parameter_id = generic_parameters
            .add_type_parameter(type_parameter("T"))
            .unwrap();
        let parameter = TypeParameterRef::new(
            parameter_id,
            GenericItemRef::Function(function_id),
        );

        let where_clause = WhereClause {
            trait_bounds: bound
                .map(|(trait_id, const_opt_out)| {
                    TraitBound::new(
                        parameter,
                        trait_id,
                        const_opt_out,
                        test_span(),
                    )
                })
                .into_iter()
                .collect(),
        };

        assert_eq!(
            self.table
                .insert_function(Function {
                    name: name.to_string(),
                    is_const: true,
                    generic_parameters,
                    where_clause,
                    span: Some(test_span()),
                })
                .unwrap(),
            function_id
        );

        self.bodies
            .insert(CallableRef::Function(function_id), body_of(parameter));

        (function_id, parameter)
    }
}

/// Builds a program with an `Add` trait, a `Point` struct with a `const
/// implements Add`, a `Text` struct with a non-const `implements Add`, and a
/// generic `Wrap[T]` struct with `implements[T] const Add for Wrap[T] where
/// T: Add`.
fn fixture() -> Fixture {
    let mut table = Table::new();
    let mut bodies = Bodies::new();

    let add_trait = table.insert_trait(Trait::new("Add")).unwrap();
    let add_function = table
        .get_trait_mut(add_trait)
        .unwrap()
        .functions
        .insert(
            "add".to_string(),
            TraitFunction { name: "add".to_string(), span: None },
        )
        .unwrap();

    let drop_trait = table.insert_trait(Trait::new("Drop")).unwrap();
    table
        .get_trait_mut(drop_trait)
        .unwrap()
        .functions
        .insert(
            "drop".to_string(),
            TraitFunction { name: "drop".to_string(), span: None },
        )
        .unwrap();
    table.set_destructor_trait(drop_trait);

    let point = table.insert_struct(Struct::new("Point")).unwrap();
    let text = table.insert_struct(Struct::new("Text")).unwrap();

    let wrap = {
        let mut declaration = Struct::new("Wrap");
        declaration
            .generic_parameters
            .add_type_parameter(type_parameter("T"))
            .unwrap();
        table.insert_struct(declaration).unwrap()
    };

    // `const implements Add for Point`
    let point_implements = next_implements_ref(&table, add_trait);
    {
        let mut functions = Map::new();
        let function_id = functions
            .insert(
                "add".to_string(),
                veloxc_symbol::ImplementsFunction {
                    name: "add".to_string(),
                    span: None,
                },
            )
            .unwrap();

        table.insert_implements(add_trait, Implements {
            is_const: true,
            generic_parameters: GenericParameters::default(),
            where_clause: WhereClause::default(),
            self_type: Type::Symbol(Symbol {
                struct_id: point,
                type_arguments: vec![],
            }),
            functions,
            span: Some(test_span()),
        });

        bodies.insert(
            CallableRef::ImplementsFunction(ImplementsFunctionRef::new(
                point_implements,
                function_id,
            )),
            Body::new(vec![Pure { span: test_span() }.into()]),
        );
    }

    // `implements Add for Text` (not const)
    table.insert_implements(add_trait, Implements {
        is_const: false,
        generic_parameters: GenericParameters::default(),
        where_clause: WhereClause::default(),
        self_type: Type::Symbol(Symbol {
            struct_id: text,
            type_arguments: vec![],
        }),
        functions: Map::new(),
        span: Some(test_span()),
    });

    // `implements[T] const Add for Wrap[T] where T: Add`
    let wrap_implements = next_implements_ref(&table, add_trait);
    let (wrap_parameter, wrap_function_id) = {
        let mut generic_parameters = GenericParameters::default();
        let parameter_id = generic_parameters
            .add_type_parameter(type_parameter("T"))
            .unwrap();
        let parameter = TypeParameterRef::new(
            parameter_id,
            GenericItemRef::Implements(wrap_implements),
        );

        let mut functions = Map::new();
        let function_id = functions
            .insert(
                "add".to_string(),
                veloxc_symbol::ImplementsFunction {
                    name: "add".to_string(),
                    span: None,
                },
            )
            .unwrap();

        table.insert_implements(add_trait, Implements {
            is_const: true,
            generic_parameters,
            where_clause: WhereClause {
                trait_bounds: vec![TraitBound::new(
                    parameter, add_trait, false, test_span(),
                )],
            },
            self_type: Type::Symbol(Symbol {
                struct_id: wrap,
                type_arguments: vec![Type::Parameter(parameter)],
            }),
            functions,
            span: Some(test_span()),
        });

        (parameter, function_id)
    };

    // the wrapped value is added through the bound
    bodies.insert(
        CallableRef::ImplementsFunction(ImplementsFunctionRef::new(
            wrap_implements,
            wrap_function_id,
        )),
        Body::new(vec![TraitCall {
            receiver_type: Type::Parameter(wrap_parameter),
            trait_id: add_trait,
            function_id: add_function,
            span: test_span(),
        }
        .into()]),
    );

    Fixture {
        table,
        bodies,
        add_trait,
        add_function,
        drop_trait,
        point,
        text,
        wrap,
        wrap_implements,
        wrap_parameter,
    }
}

#[test]
fn default_required_inference() {
    let mut fixture = fixture();
    let add_trait = fixture.add_trait;
    let add_function = fixture.add_function;

    // `const function triple_add[T: Add](..)` performing two additions
    let (function_id, parameter) = fixture.insert_const_function(
        "triple_add",
        Some((add_trait, false)),
        |parameter| {
            Body::new(vec![
                TraitCall {
                    receiver_type: Type::Parameter(parameter),
                    trait_id: add_trait,
                    function_id: add_function,
                    span: test_span(),
                }
                .into(),
                TraitCall {
                    receiver_type: Type::Parameter(parameter),
                    trait_id: add_trait,
                    function_id: add_function,
                    span: test_span(),
                }
                .into(),
            ])
        },
    );

    let registry = Registry::new();
    let class = check_function(
        function_id,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &Panic,
    )
    .unwrap();

    assert_eq!(
        class,
        ConstnessClass::conditional(Obligation::new(parameter, add_trait))
    );
    assert_eq!(registry.function_class(function_id), Some(class));
}

#[test]
fn opt_out_bound_call_is_rejected() {
    let mut fixture = fixture();
    let add_trait = fixture.add_trait;
    let add_function = fixture.add_function;

    // `const function f[T: ?const Add](..)` must not perform the addition
    let (function_id, _) = fixture.insert_const_function(
        "f",
        Some((add_trait, true)),
        |parameter| {
            Body::new(vec![TraitCall {
                receiver_type: Type::Parameter(parameter),
                trait_id: add_trait,
                function_id: add_function,
                span: test_span(),
            }
            .into()])
        },
    );

    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let registry = Registry::new();

    assert!(check_function(
        function_id,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &storage,
    )
    .is_err());

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0]
        .as_any()
        .downcast_ref::<OptOutBoundCall>()
        .is_some());
}

#[test]
fn const_implements_header_rejects_opt_out() {
    let mut fixture = fixture();
    let add_trait = fixture.add_trait;

    let opt = {
        let mut declaration = Struct::new("Opt");
        declaration
            .generic_parameters
            .add_type_parameter(type_parameter("T"))
            .unwrap();
        fixture.table.insert_struct(declaration).unwrap()
    };

    // `implements[T] const Add for Opt[T] where T: ?const Add`
    let implements_ref = next_implements_ref(&fixture.table, add_trait);
    let parameter = {
        let mut generic_parameters = GenericParameters::default();
        let parameter_id = generic_parameters
            .add_type_parameter(type_parameter("T"))
            .unwrap();
        let parameter = TypeParameterRef::new(
            parameter_id,
            GenericItemRef::Implements(implements_ref),
        );

        fixture.table.insert_implements(add_trait, Implements {
            is_const: true,
            generic_parameters,
            where_clause: WhereClause {
                trait_bounds: vec![TraitBound::new(
                    parameter, add_trait, true, test_span(),
                )],
            },
            self_type: Type::Symbol(Symbol {
                struct_id: opt,
                type_arguments: vec![Type::Parameter(parameter)],
            }),
            functions: Map::new(),
            span: Some(test_span()),
        });

        parameter
    };

    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let registry = Registry::new();

    assert!(check_implements(
        implements_ref,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &storage,
    )
    .is_err());

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);

    let rejection = diagnostics[0]
        .as_any()
        .downcast_ref::<OptOutBoundInConstImplements>()
        .unwrap();
    assert_eq!(rejection.parameter, parameter);
    assert_eq!(rejection.trait_id, add_trait);
}

#[test]
fn concrete_receiver_resolves_through_const_implementation() {
    let mut fixture = fixture();
    let add_trait = fixture.add_trait;
    let add_function = fixture.add_function;
    let receiver = fixture.wrap_of(fixture.point_type());

    let (function_id, _) =
        fixture.insert_const_function("concrete", None, |_| {
            Body::new(vec![TraitCall {
                receiver_type: receiver,
                trait_id: add_trait,
                function_id: add_function,
                span: test_span(),
            }
            .into()])
        });

    let registry = Registry::new();
    let class = check_function(
        function_id,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &Panic,
    )
    .unwrap();

    // `Wrap[Point]` bottoms out in concrete const implementations only
    assert_eq!(class, ConstnessClass::AlwaysConst);
}

#[test]
fn non_const_concrete_receiver_is_rejected() {
    let mut fixture = fixture();
    let add_trait = fixture.add_trait;
    let add_function = fixture.add_function;
    let receiver = fixture.wrap_of(fixture.text_type());

    let (function_id, _) =
        fixture.insert_const_function("concrete", None, |_| {
            Body::new(vec![TraitCall {
                receiver_type: receiver,
                trait_id: add_trait,
                function_id: add_function,
                span: test_span(),
            }
            .into()])
        });

    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let registry = Registry::new();

    assert!(check_function(
        function_id,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &storage,
    )
    .is_err());

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);

    let rejection = diagnostics[0]
        .as_any()
        .downcast_ref::<NonConstTraitCall>()
        .unwrap();
    assert_eq!(rejection.trait_id, fixture.add_trait);
}

#[test]
fn conditional_implementation_usable_at_runtime() {
    let fixture = fixture();

    let registry = Registry::new();
    let class = check_implements(
        fixture.wrap_implements,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &Panic,
    )
    .unwrap();

    assert_eq!(
        class,
        ConstnessClass::conditional(Obligation::new(
            fixture.wrap_parameter,
            fixture.add_trait
        ))
    );

    let with_text = Instantiation {
        types_by_parameter: HashMap::from([(
            fixture.wrap_parameter,
            fixture.text_type(),
        )]),
    };
    let with_point = Instantiation {
        types_by_parameter: HashMap::from([(
            fixture.wrap_parameter,
            fixture.point_type(),
        )]),
    };

    // `Wrap[Text] + Wrap[Text]` outside a const context stays legal
    check_instantiation(
        &class,
        &with_text,
        Evaluation::Runtime,
        &Assumptions::default(),
        &fixture.table,
        &registry,
        &test_span(),
        &Panic,
    )
    .unwrap();

    // the same arguments in a const context are rejected
    let storage = Storage::<Box<dyn Diagnostic>>::new();
    assert!(check_instantiation(
        &class,
        &with_text,
        Evaluation::Const,
        &Assumptions::default(),
        &fixture.table,
        &registry,
        &test_span(),
        &storage,
    )
    .is_err());

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0]
        .as_any()
        .downcast_ref::<UnsatisfiedConstObligation>()
        .is_some());
    drop(diagnostics);

    // `Wrap[Point]` satisfies the obligation even in a const context
    check_instantiation(
        &class,
        &with_point,
        Evaluation::Const,
        &Assumptions::default(),
        &fixture.table,
        &registry,
        &test_span(),
        &Panic,
    )
    .unwrap();
}

#[test]
fn never_const_callee_is_rejected_in_const_context() {
    let fixture = fixture();
    let registry = Registry::new();

    let storage = Storage::<Box<dyn Diagnostic>>::new();
    assert!(check_instantiation(
        &ConstnessClass::NeverConst,
        &Instantiation::default(),
        Evaluation::Const,
        &Assumptions::default(),
        &fixture.table,
        &registry,
        &test_span(),
        &storage,
    )
    .is_err());

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0]
        .as_any()
        .downcast_ref::<crate::diagnostic::NeverConstCallee>()
        .is_some());
    drop(diagnostics);

    // the runtime facet stays available even for a never-const callee
    check_instantiation(
        &ConstnessClass::NeverConst,
        &Instantiation::default(),
        Evaluation::Runtime,
        &Assumptions::default(),
        &fixture.table,
        &registry,
        &test_span(),
        &Panic,
    )
    .unwrap();
}

#[test]
fn resolution_overflow_is_reported() {
    let mut fixture = fixture();
    let add_trait = fixture.add_trait;
    let add_function = fixture.add_function;

    let receiver = (0..crate::resolve::DEPTH_LIMIT + 10)
        .fold(fixture.point_type(), |inner, _| fixture.wrap_of(inner));

    let (function_id, _) = fixture.insert_const_function("deep", None, |_| {
        Body::new(vec![TraitCall {
            receiver_type: receiver,
            trait_id: add_trait,
            function_id: add_function,
            span: test_span(),
        }
        .into()])
    });

    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let registry = Registry::new();

    assert!(check_function(
        function_id,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &storage,
    )
    .is_err());

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0]
        .as_any()
        .downcast_ref::<ConstResolutionOverflow>()
        .is_some());
}

#[test]
fn indirect_call_is_rejected() {
    let mut fixture = fixture();

    let (function_id, _) =
        fixture.insert_const_function("indirect", None, |_| {
            Body::new(vec![IndirectCall { span: test_span() }.into()])
        });

    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let registry = Registry::new();

    assert!(check_function(
        function_id,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &storage,
    )
    .is_err());

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0]
        .as_any()
        .downcast_ref::<IndirectCallInConstContext>()
        .is_some());
}

#[test]
fn non_const_function_call_is_rejected() {
    let mut fixture = fixture();

    let runtime_helper = fixture
        .table
        .insert_function(Function {
            name: "runtime_helper".to_string(),
            is_const: false,
            generic_parameters: GenericParameters::default(),
            where_clause: WhereClause::default(),
            span: Some(test_span()),
        })
        .unwrap();

    let (function_id, _) = fixture.insert_const_function("caller", None, |_| {
        Body::new(vec![FunctionCall {
            function_id: runtime_helper,
            type_arguments: vec![],
            span: test_span(),
        }
        .into()])
    });

    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let registry = Registry::new();

    assert!(check_function(
        function_id,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &storage,
    )
    .is_err());

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);

    let rejection = diagnostics[0]
        .as_any()
        .downcast_ref::<NonConstFunctionCall>()
        .unwrap();
    assert_eq!(rejection.function_id, runtime_helper);
}

#[test]
fn function_call_obligations_instantiate_with_type_arguments() {
    let mut fixture = fixture();
    let add_trait = fixture.add_trait;
    let add_function = fixture.add_function;

    // `const function sum[T: Add](..)`
    let (sum, _) = fixture.insert_const_function(
        "sum",
        Some((add_trait, false)),
        |parameter| {
            Body::new(vec![TraitCall {
                receiver_type: Type::Parameter(parameter),
                trait_id: add_trait,
                function_id: add_function,
                span: test_span(),
            }
            .into()])
        },
    );

    let point_type = fixture.point_type();
    let (calls_with_point, _) =
        fixture.insert_const_function("calls_with_point", None, |_| {
            Body::new(vec![FunctionCall {
                function_id: sum,
                type_arguments: vec![point_type],
                span: test_span(),
            }
            .into()])
        });

    let text_type = fixture.text_type();
    let (calls_with_text, _) =
        fixture.insert_const_function("calls_with_text", None, |_| {
            Body::new(vec![FunctionCall {
                function_id: sum,
                type_arguments: vec![text_type],
                span: test_span(),
            }
            .into()])
        });

    let registry = Registry::new();

    assert_eq!(
        check_function(
            calls_with_point,
            &fixture.table,
            &fixture.bodies,
            &registry,
            &Panic,
        )
        .unwrap(),
        ConstnessClass::AlwaysConst
    );

    let storage = Storage::<Box<dyn Diagnostic>>::new();
    assert!(check_function(
        calls_with_text,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &storage,
    )
    .is_err());

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);

    let rejection = diagnostics[0]
        .as_any()
        .downcast_ref::<UnsatisfiedConstObligation>()
        .unwrap();
    assert_eq!(rejection.function_id, Some(sum));
    assert_eq!(rejection.unsatisfied.len(), 1);
}

/// Declares `implements [const] Drop for STRUCT` with no functions.
fn insert_destructor(
    fixture: &mut Fixture,
    struct_id: ID<Struct>,
    is_const: bool,
) -> ImplementsRef {
    let implements_ref = next_implements_ref(&fixture.table, fixture.drop_trait);

    fixture.table.insert_implements(fixture.drop_trait, Implements {
        is_const,
        generic_parameters: GenericParameters::default(),
        where_clause: WhereClause::default(),
        self_type: Type::Symbol(Symbol { struct_id, type_arguments: vec![] }),
        functions: Map::new(),
        span: Some(test_span()),
    });

    implements_ref
}

#[test]
fn destructor_field_without_const_destructor_is_rejected() {
    let mut fixture = fixture();

    let foo = fixture.table.insert_struct(Struct::new("Foo")).unwrap();
    insert_destructor(&mut fixture, foo, false);

    let bar = {
        let mut declaration = Struct::new("Bar");
        declaration.fields.insert(veloxc_symbol::Field {
            name: "value".to_string(),
            ty: Type::Symbol(Symbol { struct_id: foo, type_arguments: vec![] }),
        });
        fixture.table.insert_struct(declaration).unwrap()
    };
    let bar_destructor = insert_destructor(&mut fixture, bar, true);

    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let registry = Registry::new();

    assert!(check_implements(
        bar_destructor,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &storage,
    )
    .is_err());

    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);

    let rejection = diagnostics[0]
        .as_any()
        .downcast_ref::<NonConstDropField>()
        .unwrap();
    assert_eq!(rejection.field_name, "value");
}

#[test]
fn destructor_field_with_const_destructor_is_accepted() {
    let mut fixture = fixture();

    let gem = fixture.table.insert_struct(Struct::new("Gem")).unwrap();
    insert_destructor(&mut fixture, gem, true);

    // `count` drops trivially; `value` has a const destructor
    let jar = {
        let mut declaration = Struct::new("Jar");
        declaration.fields.insert(veloxc_symbol::Field {
            name: "value".to_string(),
            ty: Type::Symbol(Symbol { struct_id: gem, type_arguments: vec![] }),
        });
        declaration.fields.insert(veloxc_symbol::Field {
            name: "count".to_string(),
            ty: Type::Primitive(veloxc_symbol::ty::Primitive::Int32),
        });
        fixture.table.insert_struct(declaration).unwrap()
    };
    let jar_destructor = insert_destructor(&mut fixture, jar, true);

    let registry = Registry::new();
    let class = check_implements(
        jar_destructor,
        &fixture.table,
        &fixture.bodies,
        &registry,
        &Panic,
    )
    .unwrap();

    assert_eq!(class, ConstnessClass::AlwaysConst);
}

#[test]
fn check_collects_independent_failures() {
    let mut fixture = fixture();
    let add_trait = fixture.add_trait;
    let add_function = fixture.add_function;

    let point_receiver = fixture.point_type();
    let (good, _) = fixture.insert_const_function("good", None, |_| {
        Body::new(vec![TraitCall {
            receiver_type: point_receiver,
            trait_id: add_trait,
            function_id: add_function,
            span: test_span(),
        }
        .into()])
    });

    let text_receiver = fixture.text_type();
    let (bad, _) = fixture.insert_const_function("bad", None, |_| {
        Body::new(vec![TraitCall {
            receiver_type: text_receiver,
            trait_id: add_trait,
            function_id: add_function,
            span: test_span(),
        }
        .into()])
    });

    let storage = Storage::<Box<dyn Diagnostic>>::new();
    let registry = check(&fixture.table, &fixture.bodies, &storage);

    // the failure of `bad` doesn't stop the sibling checks
    let diagnostics = storage.as_vec();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0]
        .as_any()
        .downcast_ref::<NonConstTraitCall>()
        .is_some());

    assert_eq!(
        registry.function_class(good),
        Some(ConstnessClass::AlwaysConst)
    );
    assert!(registry.function_class(bad).is_none());
    assert_eq!(
        registry.implements_class(fixture.wrap_implements),
        Some(ConstnessClass::conditional(Obligation::new(
            fixture.wrap_parameter,
            fixture.add_trait
        )))
    );
}
