mod deformation;
mod properties;
