mod texture_resolution;
