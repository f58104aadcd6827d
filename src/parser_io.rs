extern crate dot;

use std::io;
use std::io::Write;

use crate::parser::*;

/// A parse tree laid out for rendering with GraphViz.
pub struct ParseTree {
    pub nodes: Vec<Expression>,
    edges: Vec<GraphEdge>,
}

type GraphNode = usize;
type GraphEdge = (usize, &'static str, usize);

impl ParseTree {
    pub fn render_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        dot::render(self, writer)
    }

    /// Numbers the nodes of `root` in pre-order and records parent-child edges.
    fn add_recursive(&mut self, root: &Expression) -> GraphNode {
        let this_node = self.nodes.len();
        self.nodes.push(root.clone());

        match root {
            Expression::BinaryOp(_, l, r) => {
                let l = self.add_recursive(l);
                self.edges.push((this_node, "L", l));
                let r = self.add_recursive(r);
                self.edges.push((this_node, "R", r));
            }
            Expression::Not(f) => {
                let f = self.add_recursive(f);
                self.edges.push((this_node, "", f));
            }
            Expression::Const(_) | Expression::Var(_) => {}
        }

        this_node
    }

    pub fn new(src: &Expression) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        };
        tree.add_recursive(src);
        tree
    }
}

impl<'a> dot::Labeller<'a, GraphNode, GraphEdge> for ParseTree {
    fn graph_id(&self) -> dot::Id<'a> {
        dot::Id::new("parse_tree").expect("cannot create Id named 'parse_tree'")
    }

    fn node_id(&self, n: &GraphNode) -> dot::Id<'a> {
        dot::Id::new(format!("n_{}", n)).unwrap_or_else(|_| panic!("cannot create Id named 'n_{n}'"))
    }

    fn node_label(&self, n: &GraphNode) -> dot::LabelText<'a> {
        match &self.nodes[*n] {
            Expression::BinaryOp(op, _, _) => dot::LabelText::label(format!("{:?}", op)),
            Expression::Not(_) => dot::LabelText::label("Not".to_string()),
            Expression::Const(true) => dot::LabelText::label("True".to_string()),
            Expression::Const(false) => dot::LabelText::label("False".to_string()),
            Expression::Var(v) => dot::LabelText::label(format!("Var {}", v)),
        }
    }

    fn edge_label(&self, e: &GraphEdge) -> dot::LabelText<'a> {
        dot::LabelText::label(e.1)
    }
}

impl<'a> dot::GraphWalk<'a, GraphNode, GraphEdge> for ParseTree {
    fn nodes(&self) -> dot::Nodes<'a, GraphNode> {
        (0..self.nodes.len()).collect()
    }

    fn edges(&self) -> dot::Edges<'a, GraphEdge> {
        self.edges.clone().into()
    }

    fn source(&self, e: &GraphEdge) -> GraphNode {
        e.0
    }

    fn target(&self, e: &GraphEdge) -> GraphNode {
        e.2
    }
}
