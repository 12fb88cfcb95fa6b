use crate::geometry::{LabelTexture, Material, RingGeometry, SphereGeometry};
use crate::{CircularOrbit, Mat4, Num, Transform, Vec3};

/// A renderable sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub name: String,
    pub geometry: SphereGeometry,
    pub material: Material,
    /// Relative to the node that owns this body
    pub transform: Transform,
}

/// Text sprite owned by an [`OrbitingBody`]. Its transform is relative to
/// the owner and is never touched after the scene is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub texture: LabelTexture,
    pub transform: Transform,
}

/// A body circling its parent planet. Its transform lives in the parent's
/// frame, so the parent's motion is inherited for free.
#[derive(Debug, Clone, PartialEq)]
pub struct Satellite {
    pub body: Body,
    pub orbit: CircularOrbit,
}

impl Satellite {
    pub fn update(&mut self, time_ms: f64) {
        self.body.transform.translation = self.orbit.position_at(time_ms);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingBody {
    pub body: Body,
    pub orbit: CircularOrbit,
    pub label: Label,
    pub satellites: Vec<Satellite>,
}

impl OrbitingBody {
    /// Moves the body and its satellites to where they are at `time_ms`.
    pub fn update(&mut self, time_ms: f64) {
        self.body.transform.translation = self.orbit.position_at(time_ms);

        for satellite in &mut self.satellites {
            satellite.update(time_ms);
        }
    }
}

/// Static orbit marker, created once and never updated.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitRing {
    pub geometry: RingGeometry,
    pub material: Material,
    pub transform: Transform,
}

/// A perspective camera placed by eye/target/up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_degrees: Num,
    pub aspect: Num,
    pub near: Num,
    pub far: Num,
}

impl Viewpoint {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }

    /// Normalized device coordinates of a world-space point.
    pub fn project(&self, point: Vec3) -> Vec3 {
        (self.projection_matrix() * self.view_matrix()).project_point3(point)
    }
}

/// Addresses a node of a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeId {
    Central,
    Body(usize),
    Label(usize),
    Ring(usize),
    Satellite { body: usize, index: usize },
}

/// Borrowed view of one node.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Central(&'a Body),
    Body(&'a OrbitingBody),
    Label(&'a Label),
    Ring(&'a OrbitRing),
    Satellite(&'a Satellite),
}

/// The whole scene graph. Every child is owned by exactly one parent:
/// the scene owns the sun, the orbiting bodies and the rings, and each
/// orbiting body owns its label and satellites.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub central: Body,
    pub bodies: Vec<OrbitingBody>,
    pub rings: Vec<OrbitRing>,
    pub viewpoint: Viewpoint,
}

impl Scene {
    /// Moves every orbiting body to its position at `time_ms`.
    pub fn update(&mut self, time_ms: f64) {
        for body in &mut self.bodies {
            body.update(time_ms);
        }
    }

    pub fn find_body(&self, name: &str) -> Option<usize> {
        self.bodies.iter().position(|b| b.body.name == name)
    }

    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        match id {
            NodeId::Central => Some(Node::Central(&self.central)),
            NodeId::Body(i) => self.bodies.get(i).map(Node::Body),
            NodeId::Label(i) => self.bodies.get(i).map(|b| Node::Label(&b.label)),
            NodeId::Ring(i) => self.rings.get(i).map(Node::Ring),
            NodeId::Satellite { body, index } => self
                .bodies
                .get(body)
                .and_then(|b| b.satellites.get(index))
                .map(Node::Satellite),
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        match id {
            NodeId::Label(i) => Some(NodeId::Body(i)),
            NodeId::Satellite { body, .. } => Some(NodeId::Body(body)),
            _ => None,
        }
    }

    pub fn local_transform(&self, id: NodeId) -> Option<Transform> {
        self.node(id).map(|node| match node {
            Node::Central(body) => body.transform,
            Node::Body(orbiting) => orbiting.body.transform,
            Node::Label(label) => label.transform,
            Node::Ring(ring) => ring.transform,
            Node::Satellite(satellite) => satellite.body.transform,
        })
    }

    /// Transform of `id` relative to the scene root.
    pub fn world_transform(&self, id: NodeId) -> Option<Transform> {
        let local = self.local_transform(id)?;

        match self.parent(id) {
            Some(parent) => Some(self.world_transform(parent)?.mul_transform(&local)),
            None => Some(local),
        }
    }

    /// Every node, parents before their children.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(1 + 3 * self.bodies.len());

        ids.push(NodeId::Central);

        for (i, body) in self.bodies.iter().enumerate() {
            ids.push(NodeId::Body(i));
            ids.push(NodeId::Label(i));
            ids.extend(
                (0..body.satellites.len()).map(|index| NodeId::Satellite { body: i, index }),
            );
        }

        ids.extend((0..self.rings.len()).map(NodeId::Ring));

        ids
    }

    /// Nodes whose local transform changes from frame to frame.
    pub fn moving_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.bodies.iter().enumerate().flat_map(|(i, body)| {
            std::iter::once(NodeId::Body(i)).chain(
                (0..body.satellites.len()).map(move |index| NodeId::Satellite { body: i, index }),
            )
        })
    }
}
