fn main() {
    gyro_demos::run(gyro_demos::variants::two_triangles());
}
