mod envelope_shape;
mod health;
