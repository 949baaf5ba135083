//! Triangle meshes loaded from the OBJ text format.
//!
//! Only two record types matter for wireframe rendering: `v` (a vertex
//! position) and `f` (a triangle of 1-based vertex indices, each corner
//! optionally carrying `/texture/normal` sub-fields that are discarded).
//! Every other record is skipped.
//!
//! Face indices are validated once, after the whole source has been read,
//! so a [`Mesh`] that exists always has every face index inside its vertex
//! buffer and can be drawn without further checks.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use crate::math::Point3;

/// A triangle defined by three 0-based indices into the vertex buffer of
/// the mesh that owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Face {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub const fn indices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }
}

/// A malformed record inside an otherwise readable source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("vertex needs 3 coordinates, found {found}")]
    MissingCoordinate { found: usize },
    #[error("invalid coordinate {0:?}")]
    InvalidNumber(String),
    #[error("invalid vertex index {0:?}")]
    InvalidIndex(String),
    #[error("face has {corners} corners, only triangles are supported")]
    NonTriangularFace { corners: usize },
    #[error("record is not valid UTF-8 (byte {offset} of its fields)")]
    InvalidText { offset: usize },
}

/// Why a mesh could not be loaded. Loading is all-or-nothing: any of these
/// means no geometry was produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to read mesh source: {0}")]
    Read(#[from] io::Error),
    #[error("line {line}: {source}")]
    Parse { line: usize, source: ParseError },
    /// `index` is 0-based, so a `0` in the source text reports as `-1`.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: i64,
        vertex_count: usize,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh from already-decoded geometry, applying the same index
    /// validation as the OBJ loader.
    pub fn new(vertices: Vec<Point3>, faces: Vec<Face>) -> Result<Self, LoadError> {
        for (face_index, face) in faces.iter().enumerate() {
            for index in face.indices() {
                check_index(face_index, index as i64, vertices.len())?;
            }
        }
        Ok(Self { vertices, faces })
    }

    /// Load a mesh from an OBJ file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let io_error = |source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(io_error)?;
        let mesh = Self::from_reader(BufReader::new(file)).map_err(|err| match err {
            LoadError::Read(source) => io_error(source),
            other => other,
        })?;

        info!(
            "Loaded {} vertices and {} faces from {}",
            mesh.vertices.len(),
            mesh.faces.len(),
            path.display()
        );
        if let Some((min, max)) = mesh.bounds() {
            let extent = max - min;
            debug!(
                "Mesh bounds {:?} .. {:?} (extent {:.3} x {:.3} x {:.3})",
                min, max, extent.x, extent.y, extent.z
            );
        }
        if mesh.faces.is_empty() {
            warn!("{} contains no faces, nothing will be drawn", path.display());
        }

        Ok(mesh)
    }

    /// Parse OBJ records line by line from any buffered source.
    ///
    /// Lines are read as bytes. Only the payload of `v` and `f` records has
    /// to be UTF-8, so comments or material names in a legacy encoding are
    /// skipped like any other record.
    pub fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, LoadError> {
        let mut vertices = Vec::new();
        let mut corners = Vec::new();
        let mut skipped = 0usize;
        let mut line = Vec::new();
        let mut number = 0usize;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            number += 1;
            let Some((record, payload)) = split_record(&line) else {
                continue;
            };

            let parsed = match record {
                b"v" => record_text(payload)
                    .and_then(|text| parse_vertex(text.split_whitespace()))
                    .map(|vertex| vertices.push(vertex)),
                b"f" => record_text(payload)
                    .and_then(|text| parse_face(text.split_whitespace()))
                    .map(|face| corners.push(face)),
                _ => {
                    skipped += 1;
                    Ok(())
                }
            };
            parsed.map_err(|source| LoadError::Parse {
                line: number,
                source,
            })?;
        }

        if skipped > 0 {
            debug!("Skipped {skipped} records that do not affect wireframe rendering");
        }

        let faces = corners
            .iter()
            .enumerate()
            .map(|(face_index, &[a, b, c])| {
                Ok(Face::new(
                    check_index(face_index, a, vertices.len())?,
                    check_index(face_index, b, vertices.len())?,
                    check_index(face_index, c, vertices.len())?,
                ))
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        Ok(Self { vertices, faces })
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Corner positions of every face, in declaration order.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.faces.iter().map(|face| {
            [
                self.vertices[face.a as usize],
                self.vertices[face.b as usize],
                self.vertices[face.c as usize],
            ]
        })
    }

    /// Axis-aligned bounding box, or `None` for a mesh without vertices.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        let (first, rest) = self.vertices.split_first()?;
        Some(
            rest.iter()
                .fold((*first, *first), |(min, max), &v| (min.min(v), max.max(v))),
        )
    }

    pub fn into_parts(self) -> (Vec<Point3>, Vec<Face>) {
        (self.vertices, self.faces)
    }
}

fn check_index(face: usize, index: i64, vertex_count: usize) -> Result<u32, LoadError> {
    u32::try_from(index)
        .ok()
        .filter(|&i| (i as usize) < vertex_count)
        .ok_or(LoadError::IndexOutOfRange {
            face,
            index,
            vertex_count,
        })
}

/// Split a raw line into its record tag and the rest, or `None` if blank.
fn split_record(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let start = line.iter().position(|b| !b.is_ascii_whitespace())?;
    let line = &line[start..];
    let end = line
        .iter()
        .position(u8::is_ascii_whitespace)
        .unwrap_or(line.len());
    Some(line.split_at(end))
}

fn record_text(payload: &[u8]) -> Result<&str, ParseError> {
    std::str::from_utf8(payload).map_err(|err| ParseError::InvalidText {
        offset: err.valid_up_to(),
    })
}

fn parse_vertex<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Result<Point3, ParseError> {
    let mut coords = [0.0f32; 3];
    for (found, coord) in coords.iter_mut().enumerate() {
        let token = tokens.next().ok_or(ParseError::MissingCoordinate { found })?;
        *coord = token
            .parse()
            .map_err(|_| ParseError::InvalidNumber(token.to_string()))?;
    }
    // Anything after z (a w component, vertex colors) is ignored.
    Ok(Point3::new(coords[0], coords[1], coords[2]))
}

/// Returns the three 0-based position indices, not yet range checked.
fn parse_face<'a>(tokens: impl Iterator<Item = &'a str>) -> Result<[i64; 3], ParseError> {
    let mut indices = [0i64; 3];
    let mut corners = 0;
    for token in tokens {
        if let Some(slot) = indices.get_mut(corners) {
            *slot = parse_corner(token)?;
        }
        corners += 1;
    }
    if corners != 3 {
        return Err(ParseError::NonTriangularFace { corners });
    }
    Ok(indices)
}

/// `7`, `7/2`, `7//4` and `7/2/4` all name position 7, stored as 6.
fn parse_corner(token: &str) -> Result<i64, ParseError> {
    let position = token.split_once('/').map_or(token, |(position, _)| position);
    position
        .parse::<i64>()
        .map(|index| index.saturating_sub(1))
        .map_err(|_| ParseError::InvalidIndex(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Cursor;

    fn parse(source: &str) -> Result<Mesh, LoadError> {
        Mesh::from_reader(Cursor::new(source))
    }

    #[test]
    fn loads_quad_as_two_triangles() {
        let mesh = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 1 1 0\n\
             v 0 1 0\n\
             f 1 2 3\n\
             f 1 3 4\n",
        )
        .unwrap();

        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2), Face::new(0, 2, 3)]);
        assert_eq!(mesh.vertices()[2], Point3::new(1.0, 1.0, 0.0));

        let (vertices, faces) = mesh.into_parts();
        assert_eq!((vertices.len(), faces.len()), (4, 2));
    }

    #[test]
    fn face_sub_fields_are_discarded() {
        let plain = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        let full = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1/1 2/2/2 3/3/3\n").unwrap();
        let no_texture = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1//1 2//2 3//3\n").unwrap();

        assert_eq!(plain.faces(), full.faces());
        assert_eq!(plain.faces(), no_texture.faces());
    }

    #[test]
    fn unrelated_records_are_skipped() {
        let mesh = parse(
            "# a comment\n\
             mtllib scene.mtl\n\
             o Triangle\n\
             v -0.5 0.25 2\n\
             vt 0.0 1.0\n\
             vn 0 0 1\n\
             \n\
             v 0.5 0.25 2\n\
             g side\n\
             usemtl red\n\
             s off\n\
             v 0 1 2\n\
             f 1/1/1 2/1/1 3/1/1\n",
        )
        .unwrap();

        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces().len(), 1);
        assert_relative_eq!(mesh.vertices()[0].x, -0.5);
        assert_relative_eq!(mesh.vertices()[0].y, 0.25);
        assert_relative_eq!(mesh.vertices()[0].z, 2.0);
    }

    #[test]
    fn non_utf8_comments_are_skipped() {
        let source: &[u8] = b"# caf\xE9\nmtllib \xFCber.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = Mesh::from_reader(source).unwrap();
        assert_eq!(mesh.vertices().len(), 3);
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
    }

    #[test]
    fn non_utf8_vertex_is_a_parse_error() {
        let source: &[u8] = b"v 0 0 0\nv 1 \xE9 0\n";
        let err = Mesh::from_reader(source).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse {
                line: 2,
                source: ParseError::InvalidText { offset: 3 }
            }
        ));
    }

    #[test]
    fn crlf_and_missing_final_newline() {
        let mesh = parse("v 0 0 0\r\nv 1 0 0\r\n\tv 0 1 0\r\nf 1 2 3").unwrap();
        assert_eq!(mesh.vertices()[2], Point3::new(0.0, 1.0, 0.0));
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
    }

    #[test]
    fn extra_vertex_components_are_ignored() {
        let mesh = parse("v 1 2 3 1.0 0.5 0.5 0.5\n").unwrap();
        assert_eq!(mesh.vertices(), &[Point3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn short_vertex_is_a_parse_error() {
        let err = parse("v 0 0 0\nv 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse {
                line: 2,
                source: ParseError::MissingCoordinate { found: 2 }
            }
        ));
    }

    #[test]
    fn bad_coordinate_is_a_parse_error() {
        let err = parse("v 0 zero 0\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse { line: 1, source: ParseError::InvalidNumber(ref token) } if token == "zero"
        ));
    }

    #[test]
    fn non_triangular_faces_are_rejected() {
        let quad = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap_err();
        assert!(matches!(
            quad,
            LoadError::Parse {
                line: 5,
                source: ParseError::NonTriangularFace { corners: 4 }
            }
        ));

        let edge = parse("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(
            edge,
            LoadError::Parse {
                source: ParseError::NonTriangularFace { corners: 2 },
                ..
            }
        ));
    }

    #[test]
    fn bad_index_is_a_parse_error() {
        let err = parse("v 0 0 0\nf 1 x/1 1\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::Parse { source: ParseError::InvalidIndex(ref token), .. } if token == "x/1"
        ));
    }

    #[test]
    fn zero_index_is_out_of_range() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::IndexOutOfRange {
                face: 0,
                index: -1,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn index_past_the_end_is_out_of_range() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 2 3 4\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::IndexOutOfRange {
                face: 1,
                index: 3,
                vertex_count: 3
            }
        ));
    }

    #[test]
    fn relative_indices_are_out_of_range() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::IndexOutOfRange { index: -4, .. }
        ));
    }

    #[test]
    fn faces_may_precede_their_vertices() {
        let mesh = parse("f 1 2 3\nv 0 0 0\nv 1 0 0\nv 0 1 0\n").unwrap();
        assert_eq!(mesh.faces(), &[Face::new(0, 1, 2)]);
    }

    #[test]
    fn empty_source_gives_empty_mesh() {
        let mesh = parse("").unwrap();
        assert!(mesh.vertices().is_empty());
        assert!(mesh.faces().is_empty());
        assert_eq!(mesh.bounds(), None);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Mesh::load("definitely/not/here.obj").unwrap_err();
        match err {
            LoadError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("definitely/not/here.obj"));
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn new_validates_indices() {
        let vertices = vec![Point3::ORIGIN, Point3::new(1.0, 0.0, 0.0)];
        assert!(Mesh::new(vertices.clone(), vec![Face::new(0, 1, 1)]).is_ok());

        let err = Mesh::new(vertices, vec![Face::new(0, 1, 2)]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::IndexOutOfRange {
                face: 0,
                index: 2,
                vertex_count: 2
            }
        ));
    }

    #[test]
    fn triangles_resolve_corners_in_order() {
        let mesh = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 3 1 2\n").unwrap();
        let triangles: Vec<_> = mesh.triangles().collect();
        assert_eq!(
            triangles,
            vec![[
                Point3::new(0.0, 1.0, 0.0),
                Point3::ORIGIN,
                Point3::new(1.0, 0.0, 0.0),
            ]]
        );
    }

    #[test]
    fn bounds_cover_all_vertices() {
        let mesh = parse("v -1 2 0\nv 3 -4 5\nv 0 0 -6\n").unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Point3::new(-1.0, -4.0, -6.0));
        assert_eq!(max, Point3::new(3.0, 2.0, 5.0));
    }
}
