//! Generated variant bases.

use vc_access::derive::{PropertyAccess, variant_base};
use vc_access::variant::VariantBase;
use vc_access::walk::{self, Node};
use vc_access::{PropertyAccess, Typed};

mod shapes {
    use vc_access::derive::PropertyAccess;

    #[derive(PropertyAccess, Default, Clone, Debug, PartialEq)]
    pub struct Polygon {
        pub corners: Vec<u32>,
    }
}

#[derive(PropertyAccess, Default, Clone, Debug, PartialEq)]
#[access(variant_base = CircleBase)]
pub struct Circle {
    radius: f64,
}

#[derive(PropertyAccess, Default, Clone, Debug, PartialEq)]
pub struct Square {
    side: f64,
}

variant_base! {
    #[derive(Clone, Debug, PartialEq)]
    pub enum Shape {
        Circle,
        Square,
        Polygon(shapes::Polygon),
    }
}

fn describe(shape: &Shape) -> String {
    // No wildcard arm: a new variant breaks this function.
    match shape {
        Shape::Circle(circle) => format!("circle r={}", circle.radius),
        Shape::Square(square) => format!("square a={}", square.side),
        Shape::Polygon(polygon) => format!("polygon n={}", polygon.corners.len()),
    }
}

#[test]
fn exhaustive_match() {
    let shapes = [
        Shape::from(Circle { radius: 1.5 }),
        Shape::from(Square { side: 2.0 }),
        Shape::from(shapes::Polygon {
            corners: vec![1, 2, 3],
        }),
    ];
    let described: Vec<_> = shapes.iter().map(describe).collect();
    assert_eq!(described, ["circle r=1.5", "square a=2", "polygon n=3"]);

    let names: Vec<_> = shapes.iter().map(VariantBase::variant_name).collect();
    assert_eq!(names, Shape::VARIANTS);
}

#[test]
fn single_variant_base() {
    let base = CircleBase::from(Circle { radius: 3.0 });
    assert_eq!(CircleBase::VARIANTS, ["Circle"]);
    assert!(matches!(Circle::try_from(base), Ok(Circle { radius }) if radius == 3.0));
}

#[test]
fn walks_through_the_active_variant() {
    let shape = Shape::from(Square { side: 4.0 });
    let node = walk::export(&shape).unwrap();
    assert_eq!(node, Node::object([("side", Node::scalar(4.0))]));

    let mut target = Shape::new_variant(Square::type_ident().type_path()).unwrap();
    walk::import_into(&node, &mut target).unwrap();
    assert_eq!(target, shape);

    assert_eq!(target.identity_type(), Square::type_ident());
    assert!(walk::structurally_equal(&shape, &target).unwrap());
}
